use std::fmt;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Whole hours/minutes/seconds of a remaining duration. Floor division, no
/// rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hms {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Hms {
    /// Negative input is treated as zero.
    pub fn from_ms(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            hours: (ms / MS_PER_HOUR) as u32,
            minutes: ((ms % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            seconds: ((ms % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
        }
    }
}

/// What the timer displays show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerReadout {
    Remaining(Hms),
    /// Offer ended: `00:00:00` forever.
    Expired,
    /// Deadline could not be computed: `--:--:--`.
    Unavailable,
}

impl TimerReadout {
    /// The three two-character fields of the offer box.
    pub fn fields(&self) -> [String; 3] {
        match self {
            TimerReadout::Remaining(hms) => [
                format!("{:02}", hms.hours),
                format!("{:02}", hms.minutes),
                format!("{:02}", hms.seconds),
            ],
            TimerReadout::Expired => ["00".into(), "00".into(), "00".into()],
            TimerReadout::Unavailable => ["--".into(), "--".into(), "--".into()],
        }
    }
}

impl fmt::Display for TimerReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [h, m, s] = self.fields();
        write!(f, "{h}:{m}:{s}")
    }
}
