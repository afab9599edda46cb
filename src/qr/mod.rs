//! Credential QR codec.
//!
//! The payload is 12 decimal digits with no separators, five fixed-width
//! fields sliced by position:
//!
//! `[AA][BBBBB][CC][D][EE]`
//! - `AA` party code (01-05)
//! - `BBBBB` JRV number (00001-99999)
//! - `CC` document type (17 = JRV member, 18 = informatics custodian)
//! - `D` movement marker, always "1" for this election cycle
//! - `EE` cargo code (01-17)
//!
//! Transport is AES-256-CBC with PKCS#7 padding, Base64 encoded. The
//! pipeline is linear: ciphertext → plaintext → fields → validated record →
//! projection; the first failing stage rejects the whole operation.

pub mod catalog;
mod crypto;
#[cfg(any(test, feature = "qr-mock"))]
pub mod mock;

pub use crypto::QrKeys;

use catalog::{cargo_by_code, doc_type_by_code, party_by_code, CargoRole, Party};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

/// Movement marker for the current election cycle. A credential minted for
/// another cycle carries a different value and is rejected, never coerced.
pub const MOVEMENT: &str = "1";

/// Internal rejection taxonomy. Logged server-side for diagnostics; the HTTP
/// surface collapses every variant into one opaque "invalid credential"
/// answer so a client probing malformed codes learns nothing about which
/// stage rejected it.
#[derive(Debug, Error)]
pub enum QrError {
    #[error("ciphertext is not valid Base64")]
    Ciphertext,
    #[error("decryption failed")]
    Decrypt,
    #[error("decrypted payload is not 12 decimal digits")]
    Shape,
    #[error("unknown party code: {0}")]
    UnknownParty(String),
    #[error("unknown document type: {0}")]
    UnknownDocType(String),
    #[error("unsupported movement marker: {0}")]
    Movement(String),
    #[error("unknown cargo code: {0}")]
    UnknownCargo(String),
}

/// A validated credential. Only [`parse_qr`] constructs one, so every field
/// is guaranteed to resolve against its catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrData {
    pub party_code: String,
    pub jrv_number: String,
    pub doc_type: String,
    pub movement: String,
    pub cargo_code: String,
    /// The full 12-digit plaintext the fields were sliced from.
    pub raw: String,

    party: &'static Party,
    doc_desc: &'static str,
    cargo: &'static CargoRole,
}

pub(crate) fn is_payload(s: &str) -> bool {
    s.len() == 12 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Slice a 12-digit plaintext into its fields and validate each one against
/// its catalog, short-circuiting at the first failure.
///
/// # Errors
/// Returns the first failing field as a [`QrError`]; no partial record is
/// ever produced.
pub fn parse_qr(decrypted: &str) -> Result<QrData, QrError> {
    if !is_payload(decrypted) {
        warn!("credential payload is not 12 decimal digits");
        return Err(QrError::Shape);
    }

    let party_code = &decrypted[0..2];
    let jrv_number = &decrypted[2..7];
    let doc_type = &decrypted[7..9];
    let movement = &decrypted[9..10];
    let cargo_code = &decrypted[10..12];

    let Some(party) = party_by_code(party_code) else {
        warn!(party = party_code, "unknown party code in credential");
        return Err(QrError::UnknownParty(party_code.to_string()));
    };

    let Some(doc_desc) = doc_type_by_code(doc_type) else {
        warn!(doc_type, "unknown document type in credential");
        return Err(QrError::UnknownDocType(doc_type.to_string()));
    };

    if movement != MOVEMENT {
        // Worth distinguishing in the logs: likely a credential from a
        // different election cycle rather than tampering.
        warn!(movement, "credential movement marker is not {MOVEMENT}");
        return Err(QrError::Movement(movement.to_string()));
    }

    let Some(cargo) = cargo_by_code(cargo_code) else {
        warn!(cargo = cargo_code, "unknown cargo code in credential");
        return Err(QrError::UnknownCargo(cargo_code.to_string()));
    };

    Ok(QrData {
        party_code: party_code.to_string(),
        jrv_number: jrv_number.to_string(),
        doc_type: doc_type.to_string(),
        movement: movement.to_string(),
        cargo_code: cargo_code.to_string(),
        raw: decrypted.to_string(),
        party,
        doc_desc,
        cargo,
    })
}

/// Full pipeline: decrypt the Base64 ciphertext, then parse and validate.
///
/// # Errors
/// Returns a [`QrError`] from whichever stage rejected the input first.
pub fn process_qr(keys: &QrKeys, encrypted: &str) -> Result<QrData, QrError> {
    let decrypted = keys.decrypt_qr(encrypted)?;
    parse_qr(&decrypted)
}

/// Human-readable projection of a credential, joined against the catalogs.
/// Field names keep the CNE Spanish vocabulary since this is what the
/// clients render.
#[derive(Debug, Clone, Serialize)]
pub struct QrInfo {
    pub partido: PartidoInfo,
    pub jrv: JrvInfo,
    pub documento: DocumentoInfo,
    pub cargo: CargoInfo,
    pub raw: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartidoInfo {
    pub codigo: String,
    pub sigla: &'static str,
    pub nombre: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct JrvInfo {
    pub numero: String,
    #[serde(rename = "numeroFormateado")]
    pub numero_formateado: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentoInfo {
    pub tipo: String,
    pub descripcion: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CargoInfo {
    pub codigo: String,
    pub nombre: &'static str,
    #[serde(rename = "puedeVotar")]
    pub puede_votar: bool,
    pub tipo: &'static str,
    #[serde(rename = "restriccionHoraria")]
    pub restriccion_horaria: &'static str,
}

impl QrData {
    #[must_use]
    pub fn can_vote(&self) -> bool {
        self.cargo.can_vote
    }

    #[must_use]
    pub fn time_restriction(&self) -> &'static str {
        self.cargo.time_restriction
    }

    /// JRV number with leading zeros stripped, e.g. "00001" → "1".
    #[must_use]
    pub fn jrv_formatted(&self) -> String {
        match self.jrv_number.trim_start_matches('0') {
            "" => "0".to_string(),
            n => n.to_string(),
        }
    }

    /// Pure projection for presentation; the input is already validated so
    /// there is no failure path here.
    #[must_use]
    pub fn info(&self) -> QrInfo {
        QrInfo {
            partido: PartidoInfo {
                codigo: self.party_code.clone(),
                sigla: self.party.short_code,
                nombre: self.party.name,
            },
            jrv: JrvInfo {
                numero: self.jrv_number.clone(),
                numero_formateado: self.jrv_formatted(),
            },
            documento: DocumentoInfo {
                tipo: self.doc_type.clone(),
                descripcion: self.doc_desc,
            },
            cargo: CargoInfo {
                codigo: self.cargo_code.clone(),
                nombre: self.cargo.name,
                puede_votar: self.cargo.can_vote,
                tipo: self.cargo.category.as_str(),
                restriccion_horaria: self.cargo.time_restriction,
            },
            raw: self.raw.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::mock::{generate_mock_qr, mock_keys, MockQr};
    use super::*;

    #[test]
    fn test_parse_presidente_jrv() {
        // partyCode 02, jrvNumber 00001, docType 17, movement 1, cargoCode 01
        let data = parse_qr("020000117101").unwrap();

        assert_eq!(data.party_code, "02");
        assert_eq!(data.jrv_number, "00001");
        assert_eq!(data.doc_type, "17");
        assert_eq!(data.movement, "1");
        assert_eq!(data.cargo_code, "01");
        assert_eq!(data.raw, "020000117101");

        let info = data.info();
        assert_eq!(info.partido.sigla, "LIBRE");
        assert_eq!(info.partido.nombre, "Partido Libertad y Refundación");
        assert_eq!(info.jrv.numero_formateado, "1");
        assert_eq!(info.documento.descripcion, "CREDENCIAL MIEMBRO JRV");
        assert_eq!(info.cargo.nombre, "Presidente Propietario");
        assert_eq!(info.cargo.tipo, "MIEMBRO DE JRV");
        assert!(info.cargo.puede_votar);
        assert_eq!(info.cargo.restriccion_horaria, "1:00PM");
    }

    #[test]
    fn test_parse_custodio_cie() {
        // docType 18, cargoCode 15
        let data = parse_qr("020000118115").unwrap();

        assert_eq!(data.doc_type, "18");
        assert_eq!(data.cargo_code, "15");

        let info = data.info();
        assert_eq!(
            info.documento.descripcion,
            "CREDENCIAL CUSTODIO INFORMÁTICO ELECTORAL"
        );
        assert_eq!(info.cargo.tipo, "CIE");
        assert_eq!(info.cargo.nombre, "Custodio Informático Electoral - 1");
    }

    #[test]
    fn test_parse_rejects_bad_shape() {
        assert!(matches!(parse_qr(""), Err(QrError::Shape)));
        assert!(matches!(parse_qr("02000011710"), Err(QrError::Shape)));
        assert!(matches!(parse_qr("0200001171012"), Err(QrError::Shape)));
        assert!(matches!(parse_qr("02000011710a"), Err(QrError::Shape)));
    }

    #[test]
    fn test_parse_rejects_unknown_party() {
        assert!(matches!(
            parse_qr("060000117101"),
            Err(QrError::UnknownParty(code)) if code == "06"
        ));
        assert!(parse_qr("050000117101").is_ok());
    }

    #[test]
    fn test_parse_rejects_unknown_doc_type() {
        assert!(matches!(
            parse_qr("020000119101"),
            Err(QrError::UnknownDocType(code)) if code == "19"
        ));
    }

    #[test]
    fn test_parse_rejects_other_movement() {
        // identical to a valid credential except movement = "2"
        assert!(matches!(
            parse_qr("020000117201"),
            Err(QrError::Movement(m)) if m == "2"
        ));
    }

    #[test]
    fn test_parse_cargo_edges() {
        assert!(parse_qr("020000117117").is_ok());
        assert!(matches!(
            parse_qr("020000117118"),
            Err(QrError::UnknownCargo(code)) if code == "18"
        ));
        assert!(matches!(
            parse_qr("020000117100"),
            Err(QrError::UnknownCargo(code)) if code == "00"
        ));
    }

    #[test]
    fn test_mock_roundtrip() {
        let keys = mock_keys();

        let encrypted = generate_mock_qr(&MockQr {
            party_code: "02",
            jrv_number: "00001",
            doc_type: "17",
            cargo_code: "01",
        });

        // The mock encoder zero-pads and concatenates exactly the plaintext
        // the decrypt stage expects.
        assert_eq!(keys.decrypt_qr(&encrypted).unwrap(), "020000117101");

        let data = process_qr(&keys, &encrypted).unwrap();
        assert_eq!(data.party_code, "02");
        assert_eq!(data.jrv_number, "00001");
        assert_eq!(data.doc_type, "17");
        assert_eq!(data.cargo_code, "01");
    }

    #[test]
    fn test_roundtrip_unpadded_fields() {
        let keys = mock_keys();

        let encrypted = generate_mock_qr(&MockQr {
            party_code: "5",
            jrv_number: "42",
            doc_type: "18",
            cargo_code: "17",
        });

        let data = process_qr(&keys, &encrypted).unwrap();
        assert_eq!(data.party_code, "05");
        assert_eq!(data.jrv_number, "00042");
        assert_eq!(data.cargo_code, "17");
        assert_eq!(data.info().jrv.numero_formateado, "42");
    }

    #[test]
    fn test_decode_is_idempotent() {
        let keys = mock_keys();
        let encrypted = generate_mock_qr(&MockQr {
            party_code: "02",
            jrv_number: "00001",
            doc_type: "17",
            cargo_code: "03",
        });

        let first = process_qr(&keys, &encrypted).unwrap();
        let second = process_qr(&keys, &encrypted).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tamper_never_yields_a_different_valid_record() {
        let keys = mock_keys();
        let encrypted = generate_mock_qr(&MockQr {
            party_code: "02",
            jrv_number: "00001",
            doc_type: "17",
            cargo_code: "01",
        });
        let original = process_qr(&keys, &encrypted).unwrap();

        for i in 0..encrypted.len() {
            let mut tampered: Vec<char> = encrypted.chars().collect();
            tampered[i] = if tampered[i] == 'A' { 'B' } else { 'A' };
            let tampered: String = tampered.into_iter().collect();

            // A flipped character must never decode into a *different* valid
            // credential; anything else (any rejection) is acceptable.
            if let Ok(data) = process_qr(&keys, &tampered) {
                assert_eq!(data.raw, original.raw, "tampered index {i} silently accepted");
            }
        }
    }

    #[test]
    fn test_projection_serializes_with_wire_names() {
        let info = parse_qr("020000117101").unwrap().info();
        let value = serde_json::to_value(&info).unwrap();

        assert_eq!(value["jrv"]["numeroFormateado"], "1");
        assert_eq!(value["cargo"]["puedeVotar"], true);
        assert_eq!(value["cargo"]["restriccionHoraria"], "1:00PM");
        assert_eq!(value["partido"]["sigla"], "LIBRE");
    }
}
