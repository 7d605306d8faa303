use crate::render::Announcement;

/// Outcome of checking the coupon box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CouponStatus {
    /// Empty input: status area cleared.
    Cleared,
    Valid { code: String },
    Invalid,
}

impl CouponStatus {
    /// Status area contents.
    pub fn markup(&self) -> String {
        match self {
            CouponStatus::Cleared => String::new(),
            CouponStatus::Valid { code } => {
                format!("<span class=\"coupon-valid\">✓ {code} aplicado</span>")
            }
            CouponStatus::Invalid => "<span class=\"coupon-invalid\">✗ Cupom inválido</span>".into(),
        }
    }

    pub fn announcement(&self) -> Option<Announcement> {
        match self {
            CouponStatus::Cleared => None,
            CouponStatus::Valid { .. } => Some(Announcement::polite("Cupom aplicado com sucesso")),
            CouponStatus::Invalid => Some(Announcement::polite("Cupom inválido")),
        }
    }
}

/// Match free text against the one accepted code. Trimmed and
/// case-insensitive; no server round trip.
pub fn check_coupon(accepted: &str, input: &str) -> CouponStatus {
    let code = input.trim().to_uppercase();
    if code.is_empty() {
        CouponStatus::Cleared
    } else if code == accepted.trim().to_uppercase() {
        CouponStatus::Valid { code }
    } else {
        CouponStatus::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_code() {
        assert_eq!(
            check_coupon("BFKIT", "BFKIT"),
            CouponStatus::Valid { code: "BFKIT".into() }
        );
    }

    #[test]
    fn test_trim_and_case() {
        assert_eq!(
            check_coupon("BFKIT", "  bfKit \n"),
            CouponStatus::Valid { code: "BFKIT".into() }
        );
    }

    #[test]
    fn test_empty_clears() {
        assert_eq!(check_coupon("BFKIT", ""), CouponStatus::Cleared);
        assert_eq!(check_coupon("BFKIT", "   "), CouponStatus::Cleared);
    }

    #[test]
    fn test_other_invalid() {
        assert_eq!(check_coupon("BFKIT", "BFKIT10"), CouponStatus::Invalid);
        assert_eq!(check_coupon("BFKIT", "BF KIT"), CouponStatus::Invalid);
    }

    #[test]
    fn test_markup_and_announcement() {
        let valid = CouponStatus::Valid { code: "BFKIT".into() };
        assert_eq!(valid.markup(), "<span class=\"coupon-valid\">✓ BFKIT aplicado</span>");
        assert_eq!(
            valid.announcement().unwrap().message,
            "Cupom aplicado com sucesso"
        );
        assert_eq!(CouponStatus::Cleared.markup(), "");
        assert!(CouponStatus::Cleared.announcement().is_none());
    }
}
