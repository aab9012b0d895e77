use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;
use tally_render_core::utils::{get_styled_font_name, standard_family, to_win_ansi};
use tally_render_core::{PageBackend, RenderError, TextStyle};
use tally_style::{Margins, Orientation, PageSize};

const BASE_FONT: &str = "Helvetica";

/// A `PageBackend` that builds a PDF document with the standard Type1
/// faces, Helvetica unless another family is selected.
///
/// Fonts are added to the shared resource dictionary the first time a face
/// is used.
pub struct LopdfBackend {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    content: Content,
    state: PageRenderState,
    font_map: HashMap<String, String>,
    fonts: Dictionary,
    family: &'static str,
    page_width: f32,
    page_height: f32,
    margins: Margins,
}

#[derive(Default, Clone)]
struct PageRenderState {
    font_name: String,
    font_size: f32,
}

impl LopdfBackend {
    pub fn new(size: PageSize, orientation: Orientation) -> Self {
        let (page_width, page_height) = size.oriented_pt(orientation);
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => Object::Integer(0),
            }),
        );
        let catalog_id = document.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
        document.trailer.set("Root", catalog_id);

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
            font_map: HashMap::new(),
            fonts: Dictionary::new(),
            family: BASE_FONT,
            page_width,
            page_height,
            margins: Margins::default(),
        }
    }

    /// The resource name of a face, registering the font on first use.
    fn font_resource(&mut self, postscript_name: String) -> String {
        if let Some(internal_name) = self.font_map.get(&postscript_name) {
            return internal_name.clone();
        }
        let internal_name = format!("F{}", self.font_map.len() + 1);
        let font_id = self.document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => postscript_name.clone(),
            "Encoding" => "WinAnsiEncoding",
        });
        self.fonts.set(internal_name.as_bytes(), font_id);
        log::debug!("Registered font {} as {}", postscript_name, internal_name);
        self.font_map.insert(postscript_name, internal_name.clone());
        internal_name
    }

    fn set_font(&mut self, style: &TextStyle) {
        let internal_font_name = self.font_resource(get_styled_font_name(self.family, style.weight));

        if self.state.font_name != internal_font_name || self.state.font_size != style.font_size {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(internal_font_name.as_bytes().to_vec()), style.font_size.into()],
            ));
            self.state.font_name = internal_font_name;
            self.state.font_size = style.font_size;
        }
    }

    /// Writes the pending content stream as a page object.
    fn flush_page(&mut self) -> Result<(), RenderError> {
        let content = std::mem::replace(&mut self.content, Content { operations: vec![] });
        self.state = PageRenderState::default();

        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.page_width),
                Object::Real(self.page_height),
            ],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        });
        self.page_ids.push(page_id);
        Ok(())
    }
}

impl PageBackend for LopdfBackend {
    fn page_width(&self) -> f32 {
        self.page_width
    }

    fn page_height(&self) -> f32 {
        self.page_height
    }

    fn margins(&self) -> Margins {
        self.margins
    }

    fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    fn set_font_family(&mut self, family: &str) -> Result<(), RenderError> {
        self.family = standard_family(family)
            .ok_or_else(|| RenderError::Other(format!("unsupported font '{}'", family)))?;
        Ok(())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> Result<(), RenderError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(style);
        self.content
            .operations
            .push(Operation::new("Td", vec![x.into(), y.into()]));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn start_new_page(&mut self) -> Result<(), RenderError> {
        self.flush_page()?;
        log::debug!("Started PDF page {}", self.page_count());
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.page_ids.len() + 1
    }

    fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        self.flush_page()?;
        let fonts = std::mem::take(&mut self.fonts);
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(dictionary! { "Font" => fonts }));
        if let Some(Object::Dictionary(pages_dict)) = self.document.objects.get_mut(&self.pages_id) {
            let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
            pages_dict.set("Kids", kids);
            pages_dict.set("Count", Object::Integer(self.page_ids.len() as i64));
        }
        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        log::info!("Wrote PDF with {} pages ({} bytes)", self.page_ids.len(), buffer.len());
        Ok(buffer)
    }
}
