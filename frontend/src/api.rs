use crate::media::PickedMedia;
use gloo_net::http::{Request, Response};
use vision_shared::{AnalysisRequest, Payload, Transport, TransportError, TransportResponse};
use web_sys::FormData;

/// `fetch`-backed transport for the inference service.
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    type Blob = PickedMedia;

    async fn post(
        &self,
        request: &AnalysisRequest<PickedMedia>,
    ) -> Result<TransportResponse, TransportError> {
        let builder = Request::post(&request.url);
        let prepared = match &request.payload {
            Payload::Json(body) => builder.json(body),
            Payload::Multipart { field, blob } => builder.body(multipart(field, blob)?),
        }
        .map_err(|e| TransportError(format!("Failed to build request: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError(format!("Network error: {}", e)))?;
        read(response).await
    }

    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| TransportError(format!("Network error: {}", e)))?;
        read(response).await
    }
}

fn multipart(field: &str, media: &PickedMedia) -> Result<FormData, TransportError> {
    let form_data = FormData::new()
        .map_err(|e| TransportError(format!("Failed to create form data: {:?}", e)))?;
    let file = media.file();
    form_data
        .append_with_blob_and_filename(field, file.as_ref(), &file.name())
        .map_err(|e| TransportError(format!("Failed to attach {}: {:?}", file.name(), e)))?;
    Ok(form_data)
}

async fn read(response: Response) -> Result<TransportResponse, TransportError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError(format!("Failed to read response body: {}", e)))?;
    Ok(TransportResponse { status, body })
}
