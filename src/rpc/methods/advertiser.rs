//! Advertiser management methods.
//!
//! Add and modify take a struct keyed by wire field names. Keys are decoded
//! before the session is checked; field contents are validated after.

use std::collections::BTreeMap;

use serde_json::json;
use validator::Validate;

use crate::domain::entities::{Advertiser, AdvertiserPatch, NewAdvertiser};
use crate::error::AppError;
use crate::rpc::params::Params;
use crate::rpc::protocol::RpcError;
use crate::rpc::signature::ParamType;
use crate::rpc::value::RpcValue;
use crate::state::AppState;

const ADVERTISER_ID: &str = "advertiserId";
const ADVERTISER_NAME: &str = "advertiserName";
const CONTACT_NAME: &str = "contactName";
const EMAIL_ADDRESS: &str = "emailAddress";
const COMMENTS: &str = "comments";

/// Advertiser fields as sent by the caller. Absent keys stay `None`.
#[derive(Debug, Default, Validate)]
struct AdvertiserFields {
    advertiser_id: Option<i64>,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Field 'advertiserName' must be between 1 and 255 characters"
    ))]
    name: Option<String>,
    #[validate(length(max = 255, message = "Field 'contactName' must be at most 255 characters"))]
    contact_name: Option<String>,
    #[validate(email(message = "Field 'emailAddress' is not a valid email address"))]
    email: Option<String>,
    comments: Option<String>,
}

impl AdvertiserFields {
    fn decode(fields: &BTreeMap<String, RpcValue>) -> Result<Self, AppError> {
        let mut decoded = Self::default();

        for (key, value) in fields {
            match key.as_str() {
                ADVERTISER_ID => decoded.advertiser_id = Some(int_field(key, value)?),
                ADVERTISER_NAME => decoded.name = Some(string_field(key, value)?),
                CONTACT_NAME => decoded.contact_name = Some(string_field(key, value)?),
                EMAIL_ADDRESS => decoded.email = Some(string_field(key, value)?),
                COMMENTS => decoded.comments = Some(string_field(key, value)?),
                unknown => {
                    return Err(AppError::invalid_params(
                        format!("Field '{unknown}' in structure does not exists"),
                        json!({ "field": unknown }),
                    ));
                }
            }
        }

        Ok(decoded)
    }

    fn into_new_advertiser(self) -> Result<NewAdvertiser, AppError> {
        if self.advertiser_id.is_some() {
            return Err(AppError::invalid_params(
                format!("Field '{ADVERTISER_ID}' in structure does not exists"),
                json!({ "field": ADVERTISER_ID }),
            ));
        }
        let Some(name) = self.name else {
            return Err(required(ADVERTISER_NAME));
        };

        Ok(NewAdvertiser {
            name,
            contact_name: self.contact_name,
            email: self.email,
            comments: self.comments,
        })
    }

    fn into_patch(self) -> Result<(i64, AdvertiserPatch), AppError> {
        let Some(id) = self.advertiser_id else {
            return Err(required(ADVERTISER_ID));
        };

        Ok((
            id,
            AdvertiserPatch {
                name: self.name,
                contact_name: self.contact_name,
                email: self.email,
                comments: self.comments,
            },
        ))
    }
}

fn required(field: &str) -> AppError {
    AppError::invalid_params(
        format!("Field '{field}' is required"),
        json!({ "field": field }),
    )
}

fn field_type_error(key: &str, wanted: ParamType, got: &RpcValue) -> AppError {
    AppError::invalid_params(
        format!(
            "Field '{key}' should be {}, got {}",
            wanted.name(),
            got.type_name()
        ),
        json!({ "field": key, "wanted": wanted.name(), "got": got.type_name() }),
    )
}

fn string_field(key: &str, value: &RpcValue) -> Result<String, AppError> {
    match value {
        RpcValue::String(s) => Ok(s.clone()),
        other => Err(field_type_error(key, ParamType::String, other)),
    }
}

fn int_field(key: &str, value: &RpcValue) -> Result<i64, AppError> {
    match value {
        RpcValue::Int(i) => Ok(*i),
        other => Err(field_type_error(key, ParamType::Int, other)),
    }
}

fn to_rpc(advertiser: Advertiser) -> RpcValue {
    RpcValue::structure([
        (ADVERTISER_ID, RpcValue::Int(advertiser.id)),
        (ADVERTISER_NAME, RpcValue::String(advertiser.name)),
        (CONTACT_NAME, RpcValue::optional_string(advertiser.contact_name)),
        (EMAIL_ADDRESS, RpcValue::optional_string(advertiser.email)),
        (COMMENTS, RpcValue::optional_string(advertiser.comments)),
    ])
}

pub async fn add(state: &AppState, params: &Params) -> Result<RpcValue, RpcError> {
    let session_id = params.string(0)?;
    let fields = AdvertiserFields::decode(params.structure(1)?)?;

    state.session_service.verify(session_id).await?;

    fields.validate().map_err(AppError::from)?;
    let created = state
        .advertiser_service
        .add_advertiser(fields.into_new_advertiser()?)
        .await?;

    Ok(RpcValue::Int(created.id))
}

pub async fn modify(state: &AppState, params: &Params) -> Result<RpcValue, RpcError> {
    let session_id = params.string(0)?;
    let fields = AdvertiserFields::decode(params.structure(1)?)?;

    state.session_service.verify(session_id).await?;

    fields.validate().map_err(AppError::from)?;
    let (id, patch) = fields.into_patch()?;
    state.advertiser_service.modify_advertiser(id, patch).await?;

    Ok(RpcValue::Boolean(true))
}

pub async fn get(state: &AppState, params: &Params) -> Result<RpcValue, RpcError> {
    let session_id = params.string(0)?;
    let id = params.int(1)?;

    state.session_service.verify(session_id).await?;

    let advertiser = state.advertiser_service.get_advertiser(id).await?;
    Ok(to_rpc(advertiser))
}

pub async fn delete(state: &AppState, params: &Params) -> Result<RpcValue, RpcError> {
    let session_id = params.string(0)?;
    let id = params.int(1)?;

    state.session_service.verify(session_id).await?;

    state.advertiser_service.delete_advertiser(id).await?;
    Ok(RpcValue::Boolean(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, RpcValue)]) -> BTreeMap<String, RpcValue> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn test_decode_known_keys() {
        let decoded = AdvertiserFields::decode(&fields(&[
            (ADVERTISER_NAME, "Acme".into()),
            (EMAIL_ADDRESS, "ads@acme.test".into()),
        ]))
        .unwrap();

        assert!(decoded.validate().is_ok());
        let new_advertiser = decoded.into_new_advertiser().unwrap();
        assert_eq!(new_advertiser.name, "Acme");
        assert_eq!(new_advertiser.email.as_deref(), Some("ads@acme.test"));
        assert!(new_advertiser.contact_name.is_none());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = AdvertiserFields::decode(&fields(&[("agencyId", RpcValue::Int(1))])).unwrap_err();
        assert_eq!(err.message(), "Field 'agencyId' in structure does not exists");
    }

    #[test]
    fn test_wrong_field_type() {
        let err = AdvertiserFields::decode(&fields(&[(ADVERTISER_NAME, RpcValue::Int(1))])).unwrap_err();
        assert_eq!(err.message(), "Field 'advertiserName' should be string, got int");
    }

    #[test]
    fn test_name_required_on_add() {
        let decoded = AdvertiserFields::decode(&fields(&[(COMMENTS, "x".into())])).unwrap();
        let err = decoded.into_new_advertiser().unwrap_err();
        assert_eq!(err.message(), "Field 'advertiserName' is required");
    }

    #[test]
    fn test_id_required_on_modify() {
        let decoded = AdvertiserFields::decode(&fields(&[(ADVERTISER_NAME, "x".into())])).unwrap();
        let err = decoded.into_patch().unwrap_err();
        assert_eq!(err.message(), "Field 'advertiserId' is required");
    }

    #[test]
    fn test_invalid_email_and_empty_name() {
        let decoded = AdvertiserFields::decode(&fields(&[
            (ADVERTISER_NAME, "Acme".into()),
            (EMAIL_ADDRESS, "not-an-email".into()),
        ]))
        .unwrap();
        let err = AppError::from(decoded.validate().unwrap_err());
        assert_eq!(err.message(), "Field 'emailAddress' is not a valid email address");

        let decoded = AdvertiserFields::decode(&fields(&[(ADVERTISER_NAME, "".into())])).unwrap();
        assert!(decoded.validate().is_err());
    }

    #[test]
    fn test_struct_uses_wire_names() {
        let now = chrono::Utc::now();
        let value = to_rpc(Advertiser {
            id: 3,
            name: "Acme".to_string(),
            contact_name: None,
            email: Some("a@b.test".to_string()),
            comments: None,
            created_at: now,
            deleted_at: None,
        });

        let RpcValue::Struct(map) = value else {
            panic!("expected struct");
        };
        assert_eq!(map[ADVERTISER_ID], RpcValue::Int(3));
        assert_eq!(map[CONTACT_NAME], RpcValue::Nil);
        assert_eq!(map.len(), 5);
    }
}
