use lopdf::{Dictionary, Object, ObjectId, Stream, dictionary};
use std::collections::BTreeMap;
use std::io::{self, Seek, Write};

/// Writes PDF objects as they are produced and the cross-reference table at the end.
///
/// Object ids 1-3 are reserved for the shared resources, the page tree and the catalog,
/// which are only known once the last page is closed.
pub struct StreamingPdfWriter<W: Write + Seek> {
    out: W,
    offsets: BTreeMap<u32, u64>,
    last_id: u32,
    pub resources_id: ObjectId,
    pub pages_id: ObjectId,
    catalog_id: ObjectId,
    page_ids: Vec<ObjectId>,
    resources: Dictionary,
    info: Option<Dictionary>,
}

impl<W: Write + Seek> StreamingPdfWriter<W> {
    pub fn new(mut out: W, version: &str) -> io::Result<Self> {
        write!(out, "%PDF-{}\n", version)?;
        out.write_all(b"%\xe2\xe3\xcf\xd3\n")?;
        Ok(Self {
            out,
            offsets: BTreeMap::new(),
            last_id: 3,
            resources_id: (1, 0),
            pages_id: (2, 0),
            catalog_id: (3, 0),
            page_ids: Vec::new(),
            resources: Dictionary::new(),
            info: None,
        })
    }

    pub fn new_object_id(&mut self) -> ObjectId {
        self.last_id += 1;
        (self.last_id, 0)
    }

    /// Writes an object immediately and returns its id.
    pub fn write_object(&mut self, object: Object) -> io::Result<ObjectId> {
        let id = self.new_object_id();
        self.write_at(id, &object)?;
        Ok(id)
    }

    pub fn write_content_stream(&mut self, content: Vec<u8>) -> io::Result<ObjectId> {
        self.write_object(Object::Stream(Stream::new(dictionary! {}, content)))
    }

    pub fn set_resources(&mut self, resources: Dictionary) {
        self.resources = resources;
    }

    pub fn set_info(&mut self, info: Dictionary) {
        self.info = Some(info);
    }

    pub fn push_page_id(&mut self, page_id: ObjectId) {
        self.page_ids.push(page_id);
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn write_at(&mut self, id: ObjectId, object: &Object) -> io::Result<()> {
        self.offsets.insert(id.0, self.out.stream_position()?);
        writeln!(self.out, "{} {} obj", id.0, id.1)?;
        serialize::object(&mut self.out, object)?;
        writeln!(self.out, "\nendobj")
    }

    pub fn finish(mut self) -> io::Result<W> {
        let resources = std::mem::take(&mut self.resources);
        self.write_at(self.resources_id, &resources.into())?;

        let kids: Vec<Object> = self.page_ids.iter().copied().map(Object::Reference).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.write_at(self.pages_id, &pages.into())?;

        let catalog = dictionary! { "Type" => "Catalog", "Pages" => self.pages_id };
        self.write_at(self.catalog_id, &catalog.into())?;

        let mut trailer = dictionary! { "Root" => self.catalog_id };
        if let Some(info) = self.info.take() {
            let id = self.write_object(info.into())?;
            trailer.set("Info", id);
        }

        let size = self.last_id + 1;
        trailer.set("Size", size as i64);
        let xref_start = self.out.stream_position()?;
        self.write_xref(size)?;

        writeln!(self.out, "trailer")?;
        serialize::dictionary(&mut self.out, &trailer)?;
        write!(self.out, "\nstartxref\n{}\n%%EOF", xref_start)?;
        self.out.flush()?;
        Ok(self.out)
    }

    /// One subsection covering every id; ids never written are listed as free.
    fn write_xref(&mut self, size: u32) -> io::Result<()> {
        writeln!(self.out, "xref\n0 {}", size)?;
        writeln!(self.out, "0000000000 65535 f ")?;
        for id in 1..size {
            match self.offsets.get(&id) {
                Some(offset) => writeln!(self.out, "{:010} 00000 n ", offset)?,
                None => writeln!(self.out, "0000000000 00000 f ")?,
            }
        }
        Ok(())
    }
}

mod serialize {
    use lopdf::{Dictionary, Object};
    use std::io::{self, Write};

    pub fn object(out: &mut dyn Write, value: &Object) -> io::Result<()> {
        match value {
            Object::Null => out.write_all(b"null"),
            Object::Boolean(flag) => write!(out, "{}", flag),
            Object::Integer(n) => write!(out, "{}", n),
            Object::Real(r) => real(out, f64::from(*r)),
            Object::Name(name) => {
                out.write_all(b"/")?;
                out.write_all(name)
            }
            // always literal; callers hand over WinAnsi bytes
            Object::String(bytes, _) => {
                out.write_all(b"(")?;
                for &byte in bytes {
                    if matches!(byte, b'(' | b')' | b'\\') {
                        out.write_all(b"\\")?;
                    }
                    out.write_all(&[byte])?;
                }
                out.write_all(b")")
            }
            Object::Array(items) => {
                out.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.write_all(b" ")?;
                    }
                    object(out, item)?;
                }
                out.write_all(b"]")
            }
            Object::Dictionary(dict) => dictionary(out, dict),
            Object::Stream(stream) => {
                let mut dict = stream.dict.clone();
                dict.set("Length", stream.content.len() as i64);
                dictionary(out, &dict)?;
                out.write_all(b"\nstream\n")?;
                out.write_all(&stream.content)?;
                out.write_all(b"\nendstream")
            }
            Object::Reference((id, generation)) => write!(out, "{} {} R", id, generation),
        }
    }

    /// Keys are written in insertion order.
    pub fn dictionary(out: &mut dyn Write, dict: &Dictionary) -> io::Result<()> {
        out.write_all(b"<<")?;
        for (key, value) in dict.iter() {
            out.write_all(b"/")?;
            out.write_all(key)?;
            out.write_all(b" ")?;
            object(out, value)?;
            out.write_all(b" ")?;
        }
        out.write_all(b">>")
    }

    fn real(out: &mut dyn Write, value: f64) -> io::Result<()> {
        let text = format!("{:.3}", value);
        let trimmed = text.trim_end_matches('0').trim_end_matches('.');
        match trimmed {
            "" | "-" | "-0" => out.write_all(b"0"),
            _ => out.write_all(trimmed.as_bytes()),
        }
    }
}
