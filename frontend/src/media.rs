use gloo_file::{File as GlooFile, ObjectUrl};
use vision_shared::{MediaBlob, PreviewHandle};

/// A file the user picked, dropped or pasted.
#[derive(Clone)]
pub struct PickedMedia(GlooFile);

impl PickedMedia {
    pub fn file(&self) -> &GlooFile {
        &self.0
    }
}

impl From<GlooFile> for PickedMedia {
    fn from(file: GlooFile) -> Self {
        Self(file)
    }
}

/// Object URL for a picked file; revoked when dropped.
pub struct BlobPreview {
    uri: String,
    _url: ObjectUrl,
}

impl PreviewHandle for BlobPreview {
    fn uri(&self) -> &str {
        &self.uri
    }
}

impl MediaBlob for PickedMedia {
    type Preview = BlobPreview;

    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.raw_mime_type()
    }

    fn create_preview(&self) -> BlobPreview {
        let url = ObjectUrl::from(self.0.clone());
        BlobPreview {
            uri: url.to_string(),
            _url: url,
        }
    }
}
