//! Plain-text rendering of directory views

use std::io::{self, Write};

use chrono::FixedOffset;
use shared::{format_joined_date, AdminPartition, Listing, ListingStatus};

const SUMMARY_WIDTH: usize = 80;

/// Navigation header with the pending badge
pub fn header(brand: &str, pending: usize) -> String {
    if pending > 0 {
        format!("{} [Admin: {}]> ", brand, pending)
    } else {
        format!("{}> ", brand)
    }
}

/// Public listing cards
pub fn listing_cards(out: &mut impl Write, listings: &[&Listing]) -> io::Result<()> {
    writeln!(out, "Menampilkan {} UMKM", listings.len())?;
    if listings.is_empty() {
        writeln!(out, "Tidak ada UMKM yang ditemukan.")?;
        return Ok(());
    }
    for listing in listings {
        writeln!(
            out,
            "[{}] {} ({})",
            listing.id,
            listing.name,
            listing.category.label_id()
        )?;
        writeln!(out, "    {}", summarize(&listing.description, SUMMARY_WIDTH))?;
        writeln!(out, "    Alamat: {}", listing.address)?;
    }
    Ok(())
}

/// Detail page of one listing
pub fn listing_detail(out: &mut impl Write, listing: &Listing, offset: FixedOffset) -> io::Result<()> {
    writeln!(out, "{} ({})", listing.name, listing.category.label_id())?;
    writeln!(out, "Status: {}", listing.status.label_id())?;
    writeln!(out)?;
    writeln!(out, "Tentang UMKM")?;
    writeln!(out, "  {}", listing.description)?;
    writeln!(out, "Lokasi")?;
    writeln!(out, "  {}", listing.address)?;
    writeln!(out, "  Koordinat: {}", listing.coordinates)?;
    writeln!(out, "Galeri Foto")?;
    for (index, photo) in listing.photos.iter().enumerate() {
        writeln!(out, "  Foto {}: {}", index + 1, photo)?;
    }
    writeln!(out, "Informasi Kontak")?;
    if let (Some(phone), Some(link)) = (listing.phone.as_deref(), listing.phone_link()) {
        writeln!(out, "  Telepon: {} ({})", phone, link)?;
    }
    if let Some(link) = listing.whatsapp_link() {
        writeln!(out, "  Chat WhatsApp: {}", link)?;
    }
    if listing.phone.is_none() && listing.whatsapp.is_none() {
        writeln!(out, "  -")?;
    }
    writeln!(
        out,
        "Bergabung Sejak: {}",
        format_joined_date(listing.created_at, offset)
    )?;
    Ok(())
}

/// Admin panel: tab counters, approved totals per category and the rows of
/// the selected tab
pub fn admin_panel(
    out: &mut impl Write,
    partition: &AdminPartition<'_>,
    tab: ListingStatus,
) -> io::Result<()> {
    writeln!(out, "Panel Admin")?;
    writeln!(
        out,
        "Menunggu ({}) | Disetujui ({}) | Ditolak ({})",
        partition.pending.len(),
        partition.approved.len(),
        partition.rejected.len()
    )?;
    writeln!(out, "Per Kategori (Disetujui)")?;
    for stat in partition.approved_by_category() {
        writeln!(out, "  {}: {}", stat.category.label_id(), stat.count)?;
    }
    writeln!(out, "-- {} --", tab.label_id())?;

    let rows = partition.by_status(tab);
    if rows.is_empty() {
        writeln!(out, "Tidak ada UMKM {}.", tab.label_id().to_lowercase())?;
        return Ok(());
    }
    for listing in rows {
        writeln!(
            out,
            "{} | {} | {} | {}",
            listing.id,
            listing.name,
            listing.category.label_id(),
            listing.address
        )?;
    }
    Ok(())
}

/// Cut text to `width` characters, adding an ellipsis when shortened
fn summarize(text: &str, width: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= width {
        return first_line.to_string();
    }
    let mut cut: String = first_line.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
