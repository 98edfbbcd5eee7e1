//! SQL schema for the SQLite activity store.
//!
//! Applied on every startup; every statement is idempotent.

/// Full schema DDL.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    id          TEXT PRIMARY KEY,
    username    TEXT NOT NULL,
    password    TEXT,            -- argon2 PHC string, NULL for anonymous users
    created_at  TEXT NOT NULL
);

-- Display names resolve to exactly one user.
CREATE UNIQUE INDEX IF NOT EXISTS users_username_idx ON users(username);

CREATE TABLE IF NOT EXISTS games (
    id          TEXT PRIMARY KEY,
    league      TEXT NOT NULL,
    date        TEXT NOT NULL,
    home_team   TEXT NOT NULL,
    away_team   TEXT NOT NULL,
    venue       TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS checkins (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES users(id),
    game_id     TEXT NOT NULL REFERENCES games(id),
    mode        TEXT NOT NULL CHECK (mode IN ('in_person', 'tv')),
    rating      INTEGER CHECK (rating BETWEEN 1 AND 5),
    comment     TEXT,
    created_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL REFERENCES users(id),
    game_id     TEXT NOT NULL REFERENCES games(id),
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_checkins_game ON checkins(game_id, created_at DESC);
CREATE INDEX IF NOT EXISTS idx_checkins_created ON checkins(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_comments_game ON comments(game_id, created_at DESC);
";
