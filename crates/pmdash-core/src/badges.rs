//! CSS badge lookup for backend enums.
//!
//! Unknown values fall back to a default
//! class so the view still renders, but
//! the badge records that the value was
//! not recognized and the lookup logs it.

use tracing::{
  debug,
  warn
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct Badge {
  pub class:      &'static str,
  pub recognized: bool
}

impl Badge {
  const fn known(
    class: &'static str
  ) -> Self {
    Self {
      class,
      recognized: true
    }
  }
}

fn lookup(
  kind: &'static str,
  value: Option<&str>,
  table: &[(&str, &'static str)],
  fallback: &'static str
) -> Badge {
  let Some(value) = value else {
    debug!(kind, fallback, "missing badge value");
    return Badge {
      class:      fallback,
      recognized: false
    };
  };

  table
    .iter()
    .find(|(key, _)| *key == value)
    .map(|(_, class)| Badge::known(*class))
    .unwrap_or_else(|| {
      warn!(
        kind,
        value,
        fallback,
        "unrecognized badge value"
      );
      Badge {
        class:      fallback,
        recognized: false
      }
    })
}

pub fn project_status_badge(
  status: Option<&str>
) -> Badge {
  lookup(
    "project_status",
    status,
    &[
      ("ACTIVE", "badge-active"),
      ("COMPLETED", "badge-completed"),
      ("ON_HOLD", "badge-on-hold")
    ],
    "badge-active"
  )
}

pub fn risk_badge(
  level: Option<&str>
) -> Badge {
  lookup(
    "risk_level",
    level,
    &[
      ("Low", "badge-low"),
      ("Medium", "badge-medium"),
      ("High", "badge-high"),
      ("Critical", "badge-critical")
    ],
    "badge-medium"
  )
}

pub fn priority_badge(
  priority: Option<&str>
) -> Badge {
  lookup(
    "priority",
    priority,
    &[
      ("High", "badge-high"),
      ("Medium", "badge-medium"),
      ("Low", "badge-low")
    ],
    "badge-medium"
  )
}

/// Headline class of the risk card:
/// `risk-high`, `risk-medium`, ...
pub fn risk_text_class(
  level: Option<&str>
) -> String {
  format!(
    "risk-{}",
    level
      .unwrap_or("medium")
      .to_lowercase()
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn project_status_classes() {
    assert_eq!(
      project_status_badge(Some("ACTIVE")),
      Badge::known("badge-active")
    );
    assert_eq!(
      project_status_badge(Some(
        "COMPLETED"
      ))
      .class,
      "badge-completed"
    );
    assert_eq!(
      project_status_badge(Some("ON_HOLD"))
        .class,
      "badge-on-hold"
    );
  }

  #[test]
  fn unknown_status_falls_back_but_is_flagged(
  ) {
    let badge =
      project_status_badge(Some("active"));
    assert_eq!(badge.class, "badge-active");
    assert!(!badge.recognized);

    let missing = project_status_badge(None);
    assert_eq!(
      missing.class,
      "badge-active"
    );
    assert!(!missing.recognized);
  }

  #[test]
  fn risk_and_priority_default_to_medium() {
    assert_eq!(
      risk_badge(Some("Critical")).class,
      "badge-critical"
    );
    assert_eq!(
      risk_badge(Some("Extreme")).class,
      "badge-medium"
    );
    assert_eq!(
      priority_badge(Some("Low")).class,
      "badge-low"
    );
    assert_eq!(
      priority_badge(None).class,
      "badge-medium"
    );
  }

  #[test]
  fn risk_text_class_lowercases() {
    assert_eq!(
      risk_text_class(Some("High")),
      "risk-high"
    );
    assert_eq!(
      risk_text_class(None),
      "risk-medium"
    );
  }
}
