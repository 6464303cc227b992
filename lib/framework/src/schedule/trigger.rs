use std::time::Duration;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::Utc;

use super::Trigger;

pub(super) struct FixedRateTrigger {
    pub(super) interval: Duration,
}

impl Trigger for FixedRateTrigger {
    fn next(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::from_std(self.interval)
            .ok()
            .and_then(|interval| previous.checked_add_signed(interval))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::DateTime;
    use chrono::Utc;

    use super::FixedRateTrigger;
    use crate::schedule::Trigger;

    #[test]
    fn next() {
        let trigger = FixedRateTrigger {
            interval: Duration::from_secs(90),
        };
        let previous: DateTime<Utc> = "2024-01-01T08:00:00Z".parse().unwrap();
        assert_eq!(
            trigger.next(previous),
            "2024-01-01T08:01:30Z".parse::<DateTime<Utc>>().unwrap()
        );
    }
}
