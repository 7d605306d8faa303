use tracing::warn;

/// Number of static review groups on the page.
pub const REVIEW_GROUPS: u8 = 5;

/// Which review group is visible. Groups are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewNav {
    active: u8,
    groups: u8,
}

impl ReviewNav {
    pub fn new(groups: u8) -> Self {
        Self { active: 1, groups }
    }

    pub fn active(&self) -> u8 {
        self.active
    }

    /// Show `group`. Unknown groups leave the current one showing.
    pub fn show(&mut self, group: u8) -> bool {
        if group == 0 || group > self.groups {
            warn!(group, "review group not found");
            return false;
        }
        self.active = group;
        true
    }
}

impl Default for ReviewNav {
    fn default() -> Self {
        Self::new(REVIEW_GROUPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_first_group() {
        assert_eq!(ReviewNav::default().active(), 1);
    }

    #[test]
    fn test_show() {
        let mut nav = ReviewNav::default();
        assert!(nav.show(4));
        assert_eq!(nav.active(), 4);
    }

    #[test]
    fn test_unknown_group_keeps_current() {
        let mut nav = ReviewNav::default();
        nav.show(3);
        assert!(!nav.show(0));
        assert!(!nav.show(6));
        assert_eq!(nav.active(), 3);
    }
}
