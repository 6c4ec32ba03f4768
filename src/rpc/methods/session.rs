use crate::rpc::params::Params;
use crate::rpc::protocol::RpcError;
use crate::rpc::value::RpcValue;
use crate::state::AppState;

pub async fn logon(state: &AppState, params: &Params) -> Result<RpcValue, RpcError> {
    let username = params.string(0)?;
    let password = params.string(1)?;

    let session_id = state.session_service.logon(username, password).await?;
    Ok(RpcValue::String(session_id))
}

pub async fn logoff(state: &AppState, params: &Params) -> Result<RpcValue, RpcError> {
    let session_id = params.string(0)?;

    state.session_service.logoff(session_id).await?;
    Ok(RpcValue::Boolean(true))
}
