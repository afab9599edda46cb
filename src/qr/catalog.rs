//! Closed catalogs for the credential payload fields, per the CNE credential
//! layout for the current general election. Built once, never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

/// A political party entitled to issue delegate credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub short_code: &'static str,
    pub name: &'static str,
}

/// Role class carried by a cargo entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    MiembroJrv,
    Cie,
}

impl RoleCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MiembroJrv => "MIEMBRO DE JRV",
            Self::Cie => "CIE",
        }
    }
}

/// A position held within a polling station (JRV).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoRole {
    pub name: &'static str,
    pub can_vote: bool,
    pub category: RoleCategory,
    pub time_restriction: &'static str,
}

static PARTIES: LazyLock<HashMap<&'static str, Party>> = LazyLock::new(|| {
    HashMap::from([
        (
            "01",
            Party {
                short_code: "DC",
                name: "Partido Demócrata Cristiano",
            },
        ),
        (
            "02",
            Party {
                short_code: "LIBRE",
                name: "Partido Libertad y Refundación",
            },
        ),
        (
            "03",
            Party {
                short_code: "PINU",
                name: "Partido Innovación y Unidad Social Demócrata",
            },
        ),
        (
            "04",
            Party {
                short_code: "PLH",
                name: "Partido Liberal de Honduras",
            },
        ),
        (
            "05",
            Party {
                short_code: "PNH",
                name: "Partido Nacional de Honduras",
            },
        ),
    ])
});

static DOC_TYPES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("17", "CREDENCIAL MIEMBRO JRV"),
        ("18", "CREDENCIAL CUSTODIO INFORMÁTICO ELECTORAL"),
    ])
});

static CARGOS: LazyLock<HashMap<&'static str, CargoRole>> = LazyLock::new(|| {
    const fn jrv(name: &'static str) -> CargoRole {
        CargoRole {
            name,
            can_vote: true,
            category: RoleCategory::MiembroJrv,
            time_restriction: "1:00PM",
        }
    }

    const fn cie(name: &'static str) -> CargoRole {
        CargoRole {
            name,
            can_vote: true,
            category: RoleCategory::Cie,
            time_restriction: "1:00PM",
        }
    }

    HashMap::from([
        ("01", jrv("Presidente Propietario")),
        ("02", jrv("Presidente Suplente")),
        ("03", jrv("Secretario Propietario")),
        ("04", jrv("Secretario Suplente")),
        ("05", jrv("Escrutador Propietario")),
        ("06", jrv("Escrutador Suplente")),
        ("07", jrv("Vocal I Propietario")),
        ("08", jrv("Vocal I Suplente")),
        ("09", jrv("Vocal II Propietario")),
        ("10", jrv("Vocal II Suplente")),
        ("11", jrv("Vocal III Propietario")),
        ("12", jrv("Vocal III Suplente")),
        ("13", jrv("Vocal IV Propietario")),
        ("14", jrv("Vocal IV Suplente")),
        ("15", cie("Custodio Informático Electoral - 1")),
        ("16", cie("Custodio Informático Electoral - 2")),
        ("17", cie("Custodio Informático Electoral - 3")),
    ])
});

#[must_use]
pub fn party_by_code(code: &str) -> Option<&'static Party> {
    PARTIES.get(code)
}

#[must_use]
pub fn doc_type_by_code(code: &str) -> Option<&'static str> {
    DOC_TYPES.get(code).copied()
}

#[must_use]
pub fn cargo_by_code(code: &str) -> Option<&'static CargoRole> {
    CARGOS.get(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_complete() {
        assert_eq!(PARTIES.len(), 5);
        assert_eq!(DOC_TYPES.len(), 2);
        assert_eq!(CARGOS.len(), 17);

        // Every code a real credential can carry must resolve.
        for code in ["01", "02", "03", "04", "05"] {
            assert!(party_by_code(code).is_some(), "party {code} missing");
        }
        for code in ["17", "18"] {
            assert!(doc_type_by_code(code).is_some(), "doc type {code} missing");
        }
        for n in 1..=17 {
            let code = format!("{n:02}");
            assert!(cargo_by_code(&code).is_some(), "cargo {code} missing");
        }
    }

    #[test]
    fn test_catalog_edges() {
        assert!(party_by_code("05").is_some());
        assert!(party_by_code("06").is_none());
        assert!(party_by_code("00").is_none());

        assert!(cargo_by_code("17").is_some());
        assert!(cargo_by_code("18").is_none());
        assert!(cargo_by_code("00").is_none());

        assert!(doc_type_by_code("16").is_none());
        assert!(doc_type_by_code("19").is_none());
    }

    #[test]
    fn test_role_categories() {
        for n in 1..=14 {
            let code = format!("{n:02}");
            let cargo = cargo_by_code(&code).expect("cargo");
            assert_eq!(cargo.category, RoleCategory::MiembroJrv);
            assert!(cargo.can_vote);
        }
        for n in 15..=17 {
            let code = format!("{n:02}");
            let cargo = cargo_by_code(&code).expect("cargo");
            assert_eq!(cargo.category, RoleCategory::Cie);
        }

        assert_eq!(RoleCategory::MiembroJrv.as_str(), "MIEMBRO DE JRV");
        assert_eq!(RoleCategory::Cie.as_str(), "CIE");
    }
}
