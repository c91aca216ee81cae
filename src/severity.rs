use serde::Serialize;

/// Band of a stress factor in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// 0
    Ideal,
    /// (0, 0.5)
    Satisfactory,
    /// [0.5, 1)
    Threatening,
    /// 1
    ExtremelyCritical,
    /// Anything else, including NaN. Only reachable through inconsistent
    /// reference data or a value that was not produced by the engine.
    OutOfRange,
}

impl Severity {
    pub fn classify(value: f64) -> Self {
        match value {
            v if v == 0.0 => Severity::Ideal,
            v if 0.0 < v && v < 0.5 => Severity::Satisfactory,
            v if (0.5..1.0).contains(&v) => Severity::Threatening,
            v if v == 1.0 => Severity::ExtremelyCritical,
            v => {
                tracing::warn!("stress factor {} is outside [0, 1]", v);
                Severity::OutOfRange
            }
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Severity::Ideal => {
                "Ideal state of thinking, in full harmony with the body \
                 (no psycho-emotional stress)"
            }
            Severity::Satisfactory => {
                "Satisfactory state of thinking (psyche), adequate for normal \
                 physiological processes but requiring increased attention"
            }
            Severity::Threatening => {
                "Threatening state of thinking (psyche), pathologically affecting \
                 the physiological processes of the body"
            }
            Severity::ExtremelyCritical => {
                "Extremely critical state of thinking, maximally dangerous for \
                 the physiological processes of the body"
            }
            Severity::OutOfRange => "Undefined: stress factor outside the range [0, 1]",
        }
    }
}

pub fn describe_severity(value: f64) -> &'static str {
    Severity::classify(value).description()
}
