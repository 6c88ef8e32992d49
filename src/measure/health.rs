#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Normal,
    Low,
    Critical,
}

impl HealthStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            HealthStatus::Normal => "✅",
            HealthStatus::Low => "⚠️",
            HealthStatus::Critical => "⛔",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            HealthStatus::Normal => "Normal",
            HealthStatus::Low => "Low",
            HealthStatus::Critical => "Critical",
        };

        write!(f, "{}", result)
    }
}

pub fn classify(spo2: u8, heart_rate: u16) -> HealthStatus {
    if spo2 <= 88 || heart_rate >= 120 || heart_rate <= 45 {
        HealthStatus::Critical
    }
    else if spo2 < 94 || heart_rate >= 100 || heart_rate <= 55 {
        HealthStatus::Low
    }
    else {
        HealthStatus::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_reference_readings() {
        assert_eq!(classify(88, 70), HealthStatus::Critical);
        assert_eq!(classify(95, 70), HealthStatus::Normal);
        assert_eq!(classify(93, 70), HealthStatus::Low);
        assert_eq!(classify(98, 125), HealthStatus::Critical);
    }

    #[test]
    fn heart_rate_boundaries() {
        assert_eq!(classify(98, 45), HealthStatus::Critical);
        assert_eq!(classify(98, 46), HealthStatus::Low);
        assert_eq!(classify(98, 55), HealthStatus::Low);
        assert_eq!(classify(98, 56), HealthStatus::Normal);
        assert_eq!(classify(98, 99), HealthStatus::Normal);
        assert_eq!(classify(98, 100), HealthStatus::Low);
        assert_eq!(classify(98, 119), HealthStatus::Low);
        assert_eq!(classify(98, 120), HealthStatus::Critical);
    }

    #[test]
    fn spo2_boundaries() {
        assert_eq!(classify(89, 70), HealthStatus::Low);
        assert_eq!(classify(94, 70), HealthStatus::Normal);
        assert_eq!(classify(100, 70), HealthStatus::Normal);
    }

    #[test]
    fn labels() {
        assert_eq!(HealthStatus::Normal.to_string(), "Normal");
        assert_eq!(HealthStatus::Low.to_string(), "Low");
        assert_eq!(HealthStatus::Critical.to_string(), "Critical");
    }
}
