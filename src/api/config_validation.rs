use crate::core::AutohidePolicy;
use crate::error::{ScrollbarError, ScrollbarResult};

use super::{ScrollbarConfig, ScrollerReference};

pub(super) fn validate_thumb_min_size(size: f64) -> ScrollbarResult<()> {
    if !size.is_finite() || size < 0.0 {
        return Err(ScrollbarError::InvalidConfig(format!(
            "thumb min size must be finite and non-negative, got {size}"
        )));
    }
    Ok(())
}

pub(super) fn validate_autohide_policy(policy: AutohidePolicy) -> ScrollbarResult<()> {
    if let AutohidePolicy::Enabled { delay_ms: 0 } = policy {
        return Err(ScrollbarError::InvalidConfig(
            "autohide delay must be greater than zero".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_scroller_reference(reference: &ScrollerReference) -> ScrollbarResult<()> {
    if let ScrollerReference::Selector(selector) = reference
        && selector.trim().is_empty()
    {
        return Err(ScrollbarError::InvalidConfig(
            "scroller selector must not be empty".to_owned(),
        ));
    }
    Ok(())
}

pub(super) fn validate_config(config: &ScrollbarConfig) -> ScrollbarResult<()> {
    validate_thumb_min_size(config.thumb_min_size)?;
    validate_autohide_policy(config.autohide)?;
    validate_scroller_reference(&config.scroller)
}

#[cfg(test)]
mod tests {
    use super::validate_config;
    use crate::api::{ScrollbarConfig, ScrollerReference};

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ScrollbarConfig::default()).is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(validate_config(&ScrollbarConfig::default().with_thumb_min_size(f64::NAN)).is_err());
        assert!(validate_config(&ScrollbarConfig::default().with_thumb_min_size(-1.0)).is_err());
        assert!(validate_config(&ScrollbarConfig::default().with_autohide(0)).is_err());
        assert!(
            validate_config(
                &ScrollbarConfig::default().with_scroller(ScrollerReference::Selector("  ".into()))
            )
            .is_err()
        );
    }
}
