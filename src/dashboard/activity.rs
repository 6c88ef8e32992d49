use enum_iterator::{all, Sequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum Activity {
    Resting,
    Walking,
    Exercise,
    Sleeping,
}

impl Activity {
    pub fn all() -> Vec<Activity> {
        all::<Activity>().collect::<Vec<_>>()
    }
}

impl Default for Activity {
    fn default() -> Self {
        Activity::Resting
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = match self {
            Activity::Resting => "Resting",
            Activity::Walking => "Walking",
            Activity::Exercise => "Exercise",
            Activity::Sleeping => "Sleeping",
        };

        write!(f, "{}", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_activities_in_declaration_order() {
        assert_eq!(
            Activity::all(),
            vec![Activity::Resting, Activity::Walking, Activity::Exercise, Activity::Sleeping],
        );
        assert_eq!(Activity::default(), Activity::Resting);
    }
}
