//! Interactive console session over the listing store

use std::io::{BufRead, Write};

use chrono::FixedOffset;
use shared::{offset_hours, wib, Category, Language, ListingForm, ListingStore};

use crate::commands::{Command, HELP};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::render;

/// Prompts of the submission form, in field order
const FORM_PROMPTS: [&str; 9] = [
    "Nama UMKM *: ",
    "Kategori (Makanan/Minuman/Jasa/Kerajinan) [Makanan]: ",
    "Deskripsi *: ",
    "Alamat *: ",
    "Latitude *: ",
    "Longitude *: ",
    "URL Foto *: ",
    "Nomor Telepon: ",
    "Nomor WhatsApp (62...): ",
];

/// Presentation settings of a session
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub brand_name: String,
    pub language: Language,
    pub utc_offset: FixedOffset,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            brand_name: "BRANIMULAI".to_string(),
            language: Language::Indonesian,
            utc_offset: wib(),
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            brand_name: config.directory.brand_name.clone(),
            language: config.directory.language,
            utc_offset: offset_hours(config.display.utc_offset_hours),
        }
    }
}

/// Reads commands line by line and renders the resulting views
pub struct Session<R, W> {
    store: ListingStore,
    settings: SessionSettings,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: ListingStore, settings: SessionSettings, input: R, output: W) -> Self {
        Self {
            store,
            settings,
            input,
            output,
        }
    }

    pub fn into_parts(self) -> (ListingStore, W) {
        (self.store, self.output)
    }

    /// Run until `quit` or end of input. Only I/O failures end the session
    /// early; every other error is reported and the loop continues.
    pub fn run(&mut self) -> AppResult<()> {
        loop {
            let header = render::header(&self.settings.brand_name, self.store.pending_count());
            write!(self.output, "{}", header)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let result = line
                .parse::<Command>()
                .and_then(|command| match command {
                    Command::Quit => Ok(false),
                    command => self.execute(command).map(|_| true),
                });
            match result {
                Ok(true) => {}
                Ok(false) => break,
                Err(AppError::Io(err)) => return Err(AppError::Io(err)),
                Err(err) => self.report(&err)?,
            }
        }
        tracing::debug!(listings = self.store.len(), "Console session ended");
        Ok(())
    }

    fn execute(&mut self, command: Command) -> AppResult<()> {
        match command {
            Command::List { search, category } => {
                let results = self.store.public_query(&search, category);
                render::listing_cards(&mut self.output, &results)?;
            }
            Command::Show { id } => {
                let listing = self
                    .store
                    .get(&id)
                    .ok_or_else(|| AppError::NotFound(id.clone()))?;
                render::listing_detail(&mut self.output, listing, self.settings.utc_offset)?;
            }
            Command::Admin { tab } => {
                let partition = self.store.admin_partition();
                render::admin_panel(&mut self.output, &partition, tab)?;
            }
            Command::Add => self.add()?,
            Command::Approve { id } => {
                let name = self.listing_name(&id)?;
                self.store.approve(&id);
                writeln!(
                    self.output,
                    "\"{}\" telah disetujui dan ditampilkan di beranda",
                    name
                )?;
            }
            Command::Reject { id } => {
                let name = self.listing_name(&id)?;
                if self.confirm(&format!("Apakah Anda yakin ingin menolak \"{}\"?", name))? {
                    self.store.reject(&id);
                    writeln!(self.output, "\"{}\" telah ditolak", name)?;
                }
            }
            Command::Delete { id } => {
                let name = self.listing_name(&id)?;
                if self.confirm(&format!("Apakah Anda yakin ingin menghapus \"{}\"?", name))? {
                    self.store.delete(&id);
                    writeln!(self.output, "UMKM berhasil dihapus")?;
                }
            }
            Command::Help => writeln!(self.output, "{}", HELP)?,
            Command::Quit => {}
        }
        Ok(())
    }

    /// Walk through the submission form, one prompt per field
    fn add(&mut self) -> AppResult<()> {
        writeln!(self.output, "Tambah UMKM Baru")?;
        let Some(form) = self.read_form()? else {
            writeln!(self.output, "Dibatalkan.")?;
            return Ok(());
        };

        let listing = self.store.create(form.into_input()?)?;
        writeln!(
            self.output,
            "UMKM berhasil ditambahkan! Menunggu persetujuan. (id: {})",
            listing.id
        )?;
        Ok(())
    }

    fn read_form(&mut self) -> AppResult<Option<ListingForm>> {
        let mut values = Vec::with_capacity(FORM_PROMPTS.len());
        for label in FORM_PROMPTS {
            match self.prompt(label)? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        let [name, category, description, address, lat, lng, photo_url, phone, whatsapp]: [String; 9] =
            values
                .try_into()
                .map_err(|_| AppError::InvalidArgument("incomplete form".to_string()))?;

        let category = if category.trim().is_empty() {
            Category::default().label_id().to_string()
        } else {
            category
        };

        Ok(Some(ListingForm {
            name,
            category,
            description,
            address,
            lat,
            lng,
            photo_url,
            phone,
            whatsapp,
        }))
    }

    fn listing_name(&self, id: &str) -> AppResult<String> {
        self.store
            .get(id)
            .map(|listing| listing.name.clone())
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    fn confirm(&mut self, question: &str) -> AppResult<bool> {
        let answer = self
            .prompt(&format!("{} [y/N] ", question))?
            .unwrap_or_default();
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "ya" | "yes"
        ))
    }

    fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn report(&mut self, err: &AppError) -> AppResult<()> {
        tracing::debug!(error = %err, "Command failed");
        let detail = err.detail();
        writeln!(
            self.output,
            "Error [{}]: {}",
            detail.code,
            detail.message(self.settings.language)
        )?;
        Ok(())
    }
}
