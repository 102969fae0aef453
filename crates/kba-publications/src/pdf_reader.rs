use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, ObjectId};

use crate::error::ParseError;
use crate::options::PageSelection;

pub(crate) fn load_document(input_pdf: &Path) -> Result<Document, ParseError> {
    Ok(Document::load(input_pdf)?)
}

pub(crate) fn load_document_from_bytes(input_pdf: &[u8]) -> Result<Document, ParseError> {
    Ok(Document::load_mem(input_pdf)?)
}

pub(crate) fn selected_pages(
    document: &Document,
    page_selection: Option<&PageSelection>,
) -> Result<Vec<(u32, ObjectId)>, ParseError> {
    let pages = document
        .get_pages()
        .into_iter()
        .filter(|(page_no, _)| page_selection.is_none_or(|selection| selection.contains(*page_no)))
        .collect::<Vec<_>>();

    if pages.is_empty() && page_selection.is_some() {
        return Err(ParseError::NoPagesSelected);
    }

    Ok(pages)
}

pub(crate) fn read_page_operations(
    document: &Document,
    page: u32,
    page_id: ObjectId,
) -> Result<Vec<Operation>, ParseError> {
    let raw_content = document.get_page_content(page_id)?;
    let content =
        Content::decode(&raw_content).map_err(|source| ParseError::Tokenize { page, source })?;
    Ok(content.operations)
}
