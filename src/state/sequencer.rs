use time::OffsetDateTime;

/// Issues creation timestamps for activity writes.
///
/// Lives behind the write gate mutex; stamps never go backwards even when the wall
/// clock does, so insertion order and timestamp order agree.
#[derive(Debug, Default)]
pub struct WriteSequencer {
    last: Option<OffsetDateTime>,
}

impl WriteSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `now`, or the previously issued stamp if `now` is earlier.
    pub fn stamp(&mut self, now: OffsetDateTime) -> OffsetDateTime {
        let stamped = match self.last {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last = Some(stamped);
        stamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn stamps_follow_the_clock() {
        let mut sequencer = WriteSequencer::new();
        assert_eq!(
            sequencer.stamp(datetime!(2024-05-01 18:00 UTC)),
            datetime!(2024-05-01 18:00 UTC)
        );
        assert_eq!(
            sequencer.stamp(datetime!(2024-05-01 18:01 UTC)),
            datetime!(2024-05-01 18:01 UTC)
        );
    }

    #[test]
    fn stamps_never_go_backwards() {
        let mut sequencer = WriteSequencer::new();
        sequencer.stamp(datetime!(2024-05-01 18:00 UTC));
        assert_eq!(
            sequencer.stamp(datetime!(2024-05-01 17:59 UTC)),
            datetime!(2024-05-01 18:00 UTC)
        );
    }
}
