use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::levels::{is_allowed_level, Level};
use super::matcher::{best_match, RoleMatch};

/// Standard role definition from the function catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub code: String,
    pub title: String,
    pub family: String,
    pub level: Level,
    /// Reserved for keyword based matching; not consulted yet.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Role {
    pub fn new(code: &str, title: &str, family: &str, level: Level) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            family: family.to_string(),
            level,
            keywords: Vec::new(),
        }
    }

    pub fn distance_to(&self, level: Level) -> u8 {
        self.level.abs_diff(level)
    }
}

/// Read-only table of standard roles, loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCatalog {
    roles: Vec<Role>,
}

const STANDARD_ROLES: [(&str, &str, &str, Level); 41] = [
    ("UITV_8", "Uitvoerder (8)", "Projectleiding", 8),
    ("PL_8", "Projectleider (8)", "Projectleiding", 8),
    ("PL_9", "Projectleider (9)", "Projectleiding", 9),
    ("PL_10", "Projectleider (10)", "Projectleiding", 10),
    ("TEK_5", "Tekenaar (5)", "Bedrijfsbureau", 5),
    ("TEK_6", "Tekenaar (6)", "Bedrijfsbureau", 6),
    ("CALC_6", "Calculator (6)", "Bedrijfsbureau", 6),
    ("CALC_7", "Calculator (7)", "Bedrijfsbureau", 7),
    ("WV_6", "Werkvoorbereider (6)", "Bedrijfsbureau", 6),
    ("WV_7", "Werkvoorbereider (7)", "Bedrijfsbureau", 7),
    ("ENG_8", "Engineer (8)", "Bedrijfsbureau", 8),
    ("ENG_9", "Engineer (9)", "Bedrijfsbureau", 9),
    ("SW_8", "Software Engineer (8)", "Bedrijfsbureau", 8),
    ("SW_9", "Software Engineer (9)", "Bedrijfsbureau", 9),
    ("BIM_8", "BIM Modelleur (8)", "Bedrijfsbureau", 8),
    ("BIM_10", "BIM Coördinator (10)", "Bedrijfsbureau", 10),
    ("ASM_3", "Assistent Monteur (3)", "Montage", 3),
    ("MON_4", "Monteur (4)", "Montage", 4),
    ("MON_5", "Monteur (5)", "Montage", 5),
    ("MON_6", "Monteur (6)", "Montage", 6),
    ("HM_6", "Hoofdmonteur (6)", "Montage", 6),
    ("HM_7", "Hoofdmonteur (7)", "Montage", 7),
    ("MS_7", "Montagespecialist (7)", "Montage", 7),
    ("MS_8", "Montagespecialist (8)", "Montage", 8),
    ("SM_5", "Service Monteur (5)", "Technisch beheer", 5),
    ("SM_6", "Service Monteur (6)", "Technisch beheer", 6),
    ("SS_7", "Service Specialist (7)", "Technisch beheer", 7),
    ("SS_8", "Service Specialist (8)", "Technisch beheer", 8),
    ("SC_7", "Service Coördinator (7)", "Technisch beheer", 7),
    ("SC_8", "Service Coördinator (8)", "Technisch beheer", 8),
    ("SC_9", "Service Coördinator (9)", "Technisch beheer", 9),
    ("IB_7", "Inbedrijfsteller (7)", "Technisch beheer", 7),
    ("IB_8", "Inbedrijfsteller (8)", "Technisch beheer", 8),
    ("CB_7", "Contractbeheerder (7)", "Technisch beheer", 7),
    ("CB_8", "Contractbeheerder (8)", "Technisch beheer", 8),
    ("TB_7", "Technisch Beheerder (7)", "Technisch beheer", 7),
    ("TB_8", "Technisch Beheerder (8)", "Technisch beheer", 8),
    ("MAG_5", "Magazijnmedewerker (5)", "Ondersteunend", 5),
    ("ADM_6", "Administratief Medewerker (6)", "Ondersteunend", 6),
    ("INS_9", "Inspecteur Installaties (9)", "Ondersteunend", 9),
    ("ADV_9", "Adviseur (duurzame) techniek (9)", "Ondersteunend", 9),
];

impl RoleCatalog {
    /// Built-in catalog of standard installation-sector roles.
    pub fn standard() -> Self {
        let roles = STANDARD_ROLES
            .iter()
            .map(|(code, title, family, level)| Role::new(code, title, family, *level))
            .collect();
        Self { roles }
    }

    /// Validate and wrap a custom role table.
    pub fn from_roles(roles: Vec<Role>) -> Result<Self, CatalogError> {
        let mut codes = HashSet::new();
        for role in &roles {
            if !is_allowed_level(role.level) {
                return Err(CatalogError::InvalidLevel {
                    code: role.code.clone(),
                    level: role.level,
                });
            }
            if !codes.insert(role.code.as_str()) {
                return Err(CatalogError::DuplicateCode(role.code.clone()));
            }
        }
        Ok(Self { roles })
    }

    /// Load a catalog from a JSON array of roles.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let roles: Vec<Role> = serde_json::from_reader(reader)?;
        Self::from_roles(roles)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn roles_in<'a>(&'a self, family: &'a str) -> impl Iterator<Item = &'a Role> + 'a {
        self.roles.iter().filter(move |role| role.family == family)
    }

    /// Distinct family names, sorted.
    pub fn families(&self) -> Vec<String> {
        self.roles
            .iter()
            .map(|role| role.family.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn contains_family(&self, family: &str) -> bool {
        self.roles.iter().any(|role| role.family == family)
    }

    pub fn find(&self, code: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.code == code)
    }

    pub fn best_match(&self, family: &str, final_level: Level) -> RoleMatch {
        best_match(family, final_level, &self.roles)
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read role catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid role catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("role {code} has level {level} outside the allowed function levels")]
    InvalidLevel { code: String, level: Level },
    #[error("role code {0} appears more than once")]
    DuplicateCode(String),
}
