use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use super::{normalize_digits, valid_dni, valid_phone};
use crate::credencial::{geo, AppState};
use crate::qr;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    /// Encrypted credential QR payload, Base64.
    qr_code: String,
    dni: String,
    phone: String,
    latitude: f64,
    longitude: f64,
}

fn reject(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Delegate check-in: credential decode, identity shape checks and GPS
/// proximity to the JRV's voting center.
///
/// Any credential failure maps to one opaque 400; the response never says
/// which stage of the codec rejected the code.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = Login,
    responses(
        (status = 200, description = "Credential accepted, returns the credential projection and eligibility gates"),
        (status = 400, description = "Missing fields, malformed DNI/phone, or invalid credential"),
        (status = 403, description = "Device is too far from the JRV's voting center"),
        (status = 404, description = "JRV not present in the center directory"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    payload: Option<Json<Login>>,
) -> Response {
    let Some(Json(login)) = payload else {
        return reject(StatusCode::BAD_REQUEST, "Faltan campos requeridos");
    };

    let dni = normalize_digits(&login.dni);
    if !valid_dni(&dni) {
        return reject(StatusCode::BAD_REQUEST, "DNI inválido. Debe tener 13 dígitos.");
    }

    let phone = normalize_digits(&login.phone);
    if !valid_phone(&phone) {
        return reject(
            StatusCode::BAD_REQUEST,
            "Teléfono inválido. Debe tener 8 dígitos.",
        );
    }

    if !geo::within_honduras(login.latitude, login.longitude) {
        return reject(
            StatusCode::BAD_REQUEST,
            "Coordenadas GPS fuera del territorio nacional.",
        );
    }

    // The internal reason is logged by the codec; the client only ever sees
    // the one opaque message.
    let Ok(credential) = qr::process_qr(&state.keys, &login.qr_code) else {
        return reject(
            StatusCode::BAD_REQUEST,
            "Código QR inválido o no se pudo descifrar. Verifica tu credencial.",
        );
    };

    let qr_info = credential.info();

    let Some(center) = state.centers.find(&credential.jrv_number) else {
        warn!(jrv = %credential.jrv_number, "JRV missing from center directory");
        return reject(
            StatusCode::NOT_FOUND,
            &format!(
                "JRV {} no encontrada en el sistema. Contacta al coordinador.",
                qr_info.jrv.numero_formateado
            ),
        );
    };

    let distance_km = geo::distance_m(
        login.latitude,
        login.longitude,
        center.latitude,
        center.longitude,
    ) / 1000.0;

    if distance_km > geo::MAX_DISTANCE_KM {
        info!(
            jrv = %credential.jrv_number,
            center = %center.name,
            distance_km = format!("{distance_km:.2}").as_str(),
            "login rejected by GPS distance"
        );

        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": format!(
                    "Tu ubicación está muy lejos del centro de votación de tu JRV ({distance_km:.1} km de {}). Debes estar a máximo {} km.",
                    center.name, geo::MAX_DISTANCE_KM,
                ),
                "distance": distance_km,
                "maxDistance": geo::MAX_DISTANCE_KM,
                "jrv": qr_info.jrv.numero_formateado,
                "centro": center.name,
            })),
        )
            .into_response();
    }

    info!(
        jrv = %credential.jrv_number,
        cargo = %qr_info.cargo.nombre,
        center = %center.name,
        "delegate checked in"
    );

    (
        StatusCode::OK,
        Json(json!({
            "credencial": qr_info,
            "centro": {
                "nombre": center.name,
                "latitude": center.latitude,
                "longitude": center.longitude,
            },
            "distanciaKm": distance_km,
            "puedeVotar": credential.can_vote(),
            "restriccionHoraria": credential.time_restriction(),
        })),
    )
        .into_response()
}
