//! Generic client for the external CRUD API.
//!
//! Every collection lives under `/api/<resource>`. All calls carry the stored
//! bearer token and report failures as `"Failed to …"` strings.

use contracts::shared::export::{ExportDelivery, ExportReceipt, ExportRequest};
use contracts::shared::import::ImportReport;
use contracts::shared::list_query::ListQuery;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, File, FormData};

use crate::shared::api_utils::{api_url, bearer};

/// What an export produced
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// File body, already handed to the browser as a download
    Downloaded { file_name: String },
    Emailed(ExportReceipt),
}

fn collection_url(resource: &str) -> String {
    api_url(&format!("/api/{}", resource))
}

fn item_url(resource: &str, id: &str) -> String {
    api_url(&format!("/api/{}/{}", resource, urlencoding::encode(id)))
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match bearer() {
        Some(value) => builder.header("Authorization", &value),
        None => builder,
    }
}

async fn ensure_ok(response: Response, action: &str, resource: &str) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::warn!("{} {} failed: {} {}", action, resource, status, body);
    Err(failure_message(action, resource, status, &body))
}

fn failure_message(action: &str, resource: &str, status: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        format!("Failed to {} {}: {}", action, resource, status)
    } else {
        format!("Failed to {} {}: {} {}", action, resource, status, body)
    }
}

/// Email deliveries answer with a receipt, downloads with the file body.
fn expects_file(request: &ExportRequest) -> bool {
    matches!(request.delivery, ExportDelivery::Download)
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn list<T: DeserializeOwned>(resource: &str, query: &ListQuery) -> Result<Vec<T>, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to encode query: {}", e))?;
    let url = if qs.is_empty() {
        collection_url(resource)
    } else {
        format!("{}?{}", collection_url(resource), qs)
    };

    let response = with_auth(Request::get(&url))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    let response = ensure_ok(response, "load", resource).await?;
    parse_json(response).await
}

pub async fn create<D, T>(resource: &str, dto: &D) -> Result<T, String>
where
    D: Serialize,
    T: DeserializeOwned,
{
    let response = with_auth(Request::post(&collection_url(resource)))
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    let response = ensure_ok(response, "create", resource).await?;
    parse_json(response).await
}

pub async fn update<D, T>(resource: &str, id: &str, dto: &D) -> Result<T, String>
where
    D: Serialize,
    T: DeserializeOwned,
{
    let response = with_auth(Request::put(&item_url(resource, id)))
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    let response = ensure_ok(response, "update", resource).await?;
    parse_json(response).await
}

pub async fn delete(resource: &str, id: &str) -> Result<(), String> {
    let response = with_auth(Request::delete(&item_url(resource, id)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    ensure_ok(response, "delete", resource).await?;
    Ok(())
}

/// Upload one spreadsheet as `multipart/form-data` (field `file`).
pub async fn import(resource: &str, file: File) -> Result<ImportReport, String> {
    let form_data = FormData::new().map_err(|e| format!("Failed to build form data: {:?}", e))?;
    form_data
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|e| format!("Failed to attach file: {:?}", e))?;

    let url = api_url(&format!("/api/{}/import", resource));
    let response = with_auth(Request::post(&url))
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    let response = ensure_ok(response, "import", resource).await?;
    parse_json(response).await
}

/// Request an export; downloads the file or returns the mail receipt.
pub async fn export(resource: &str, request: &ExportRequest) -> Result<ExportOutcome, String> {
    request.validate()?;

    let url = api_url(&format!("/api/{}/export", resource));
    let response = with_auth(Request::post(&url))
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    let response = ensure_ok(response, "export", resource).await?;

    if !expects_file(request) {
        return parse_json(response).await.map(ExportOutcome::Emailed);
    }

    let raw: web_sys::Response = response.into();
    let promise = raw
        .blob()
        .map_err(|e| format!("Failed to read export: {:?}", e))?;
    let blob: Blob = JsFuture::from(promise)
        .await
        .map_err(|e| format!("Failed to read export: {:?}", e))?
        .dyn_into()
        .map_err(|e| format!("Failed to read export: {:?}", e))?;

    let file_name = request.format.file_name(resource);
    crate::shared::download::download_blob(&blob, &file_name)?;
    Ok(ExportOutcome::Downloaded { file_name })
}

#[cfg(test)]
mod tests {
    use contracts::shared::export::ExportFormat;

    use super::*;

    #[test]
    fn test_failure_message_carries_server_text() {
        assert_eq!(
            failure_message("create", "employees", 422, "  email taken\n"),
            "Failed to create employees: 422 email taken"
        );
        assert_eq!(
            failure_message("delete", "roles", 403, ""),
            "Failed to delete roles: 403"
        );
    }

    #[test]
    fn test_only_download_exports_read_a_file_body() {
        let download = ExportRequest::new(
            None,
            ListQuery::default(),
            ExportFormat::Csv,
            ExportDelivery::Download,
        );
        let email = ExportRequest::new(
            None,
            ListQuery::default(),
            ExportFormat::Xlsx,
            ExportDelivery::Email {
                recipient: "hr@example.com".to_string(),
            },
        );
        assert!(expects_file(&download));
        assert!(!expects_file(&email));
    }
}
