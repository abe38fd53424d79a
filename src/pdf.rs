use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use lopdf::{Document, Object, ObjectId};

// Page numbers are 1-based throughout, matching lopdf's page map.
pub trait PageSource {
    fn page_count(&self) -> usize;
    fn page_text(&self, page_number: usize) -> Result<String>;
    fn write_page(&self, page_number: usize, path: &Path) -> Result<()>;
}

pub struct PdfFile {
    path: PathBuf,
    document: Document,
}

impl PdfFile {
    pub fn open(path: &Path) -> Result<Self> {
        let document = Document::load(path)
            .with_context(|| format!("failed to open PDF: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
        })
    }

    pub fn write_range(&self, from: usize, to: usize, path: &Path) -> Result<()> {
        let total = self.document.get_pages().len();
        if from < 1 || to > total || from > to {
            bail!(
                "invalid page range {}-{} for {} ({} pages)",
                from,
                to,
                self.path.display(),
                total
            );
        }

        let mut extracted = self.document.clone();
        let delete: Vec<u32> = (1..=total as u32)
            .filter(|number| (*number as usize) < from || (*number as usize) > to)
            .collect();
        if !delete.is_empty() {
            extracted.delete_pages(&delete);
        }

        extracted.prune_objects();
        extracted
            .save(path)
            .with_context(|| format!("failed to save extracted pages: {}", path.display()))?;

        Ok(())
    }
}

impl PageSource for PdfFile {
    fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    fn page_text(&self, page_number: usize) -> Result<String> {
        let text = self
            .document
            .extract_text(&[page_number as u32])
            .with_context(|| {
                format!(
                    "failed to extract text from {} page {}",
                    self.path.display(),
                    page_number
                )
            })?;

        Ok(text.replace('\u{0000}', ""))
    }

    fn write_page(&self, page_number: usize, path: &Path) -> Result<()> {
        self.write_range(page_number, page_number, path)
    }
}

// Adapted from lopdf's merge recipe.
pub fn merge_documents(inputs: &[PathBuf], output: &Path) -> Result<()> {
    if inputs.is_empty() {
        bail!("no input PDFs to merge");
    }

    let mut max_id = 1;
    let mut pages: BTreeMap<ObjectId, Object> = BTreeMap::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for input in inputs {
        let mut document = Document::load(input)
            .with_context(|| format!("failed to open PDF: {}", input.display()))?;
        document.renumber_objects_with(max_id);
        max_id = document.max_id + 1;

        for (_, object_id) in document.get_pages() {
            let object = document
                .get_object(object_id)
                .with_context(|| format!("missing page object in {}", input.display()))?
                .to_owned();
            pages.insert(object_id, object);
        }

        objects.extend(document.objects);
    }

    let mut catalog_object: Option<(ObjectId, Object)> = None;
    let mut pages_object: Option<(ObjectId, Object)> = None;
    let mut merged = Document::with_version("1.5");

    for (object_id, object) in objects {
        match object.type_name().unwrap_or("") {
            "Catalog" => {
                let id = catalog_object.as_ref().map(|(id, _)| *id).unwrap_or(object_id);
                catalog_object = Some((id, object));
            }
            "Pages" => {
                if let Ok(dictionary) = object.as_dict() {
                    let mut dictionary = dictionary.clone();
                    if let Some((_, ref existing)) = pages_object {
                        if let Ok(existing) = existing.as_dict() {
                            dictionary.extend(existing);
                        }
                    }

                    let id = pages_object.as_ref().map(|(id, _)| *id).unwrap_or(object_id);
                    pages_object = Some((id, Object::Dictionary(dictionary)));
                }
            }
            // Outlines are dropped rather than stitched together.
            "Page" | "Outlines" | "Outline" => {}
            _ => {
                merged.objects.insert(object_id, object);
            }
        }
    }

    let Some((pages_id, pages_root)) = pages_object else {
        bail!("no Pages tree found across the input PDFs");
    };
    let Some((catalog_id, catalog_root)) = catalog_object else {
        bail!("no Catalog found across the input PDFs");
    };

    for (object_id, object) in &pages {
        if let Ok(dictionary) = object.as_dict() {
            let mut dictionary = dictionary.clone();
            dictionary.set("Parent", pages_id);
            merged
                .objects
                .insert(*object_id, Object::Dictionary(dictionary));
        }
    }

    if let Ok(dictionary) = pages_root.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Count", pages.len() as u32);
        dictionary.set(
            "Kids",
            pages
                .keys()
                .map(|object_id| Object::Reference(*object_id))
                .collect::<Vec<_>>(),
        );
        merged.objects.insert(pages_id, Object::Dictionary(dictionary));
    }

    if let Ok(dictionary) = catalog_root.as_dict() {
        let mut dictionary = dictionary.clone();
        dictionary.set("Pages", pages_id);
        dictionary.remove(b"Outlines");
        merged
            .objects
            .insert(catalog_id, Object::Dictionary(dictionary));
    }

    merged.trailer.set("Root", catalog_id);
    merged.max_id = merged.objects.len() as u32;
    merged.renumber_objects();
    merged.compress();
    merged
        .save(output)
        .with_context(|| format!("failed to save merged PDF: {}", output.display()))?;

    Ok(())
}
