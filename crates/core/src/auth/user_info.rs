use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Unspecified,
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Self::Unspecified, Self::Male, Self::Female, Self::Other];

    pub fn label(self) -> &'static str {
        match self {
            Self::Unspecified => "Prefer not to say",
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Participant details collected after signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Gender,
}

/// A partial update; `None` fields leave the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserInfoPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<Gender>,
}

impl UserInfo {
    pub fn apply(&mut self, patch: UserInfoPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = v;
        }
        if let Some(v) = patch.last_name {
            self.last_name = v;
        }
        if let Some(v) = patch.birth_date {
            self.birth_date = Some(v);
        }
        if let Some(v) = patch.gender {
            self.gender = v;
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.last_name.trim().is_empty()
            && self.birth_date.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_merges_field_by_field() {
        let mut info = UserInfo::default();
        info.apply(UserInfoPatch {
            first_name: Some("Ada".into()),
            ..Default::default()
        });
        info.apply(UserInfoPatch {
            last_name: Some("Lovelace".into()),
            gender: Some(Gender::Female),
            ..Default::default()
        });
        assert_eq!(info.first_name, "Ada");
        assert_eq!(info.last_name, "Lovelace");
        assert_eq!(info.gender, Gender::Female);
        assert!(!info.is_complete());
        info.apply(UserInfoPatch {
            birth_date: NaiveDate::from_ymd_opt(1990, 12, 10),
            ..Default::default()
        });
        assert!(info.is_complete());
    }

    #[test]
    fn patch_from_partial_json() {
        let patch: UserInfoPatch =
            serde_json::from_str(r#"{"birthDate":"2001-02-03","gender":"other"}"#).expect("json");
        assert_eq!(patch.birth_date, NaiveDate::from_ymd_opt(2001, 2, 3));
        assert_eq!(patch.gender, Some(Gender::Other));
        assert_eq!(patch.first_name, None);
    }
}
