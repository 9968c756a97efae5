//! WebAssembly bridge for the UMKM Directory
//!
//! Exposes the listing store to the browser presentation layer:
//! - Submitting, approving, rejecting and deleting listings
//! - Public search/filter and the admin status partition
//! - Change notifications to JavaScript callbacks
//!
//! Values cross the boundary as JSON strings in the listing's camelCase shape.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::console;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::store::*;
pub use shared::types::*;

/// Detail page view of one listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail<'a> {
    pub listing: &'a Listing,
    pub coordinates_label: String,
    pub joined_since: String,
    pub whatsapp_link: Option<String>,
    pub phone_link: Option<String>,
}

#[derive(Debug, Serialize)]
struct CategoryOption {
    value: String,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct CategoryStat {
    value: String,
    label: &'static str,
    count: usize,
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console::log_1(&"UMKM directory module loaded".into());
}

/// The in-memory directory owned by the page session
#[wasm_bindgen]
#[derive(Default)]
pub struct Directory {
    store: ListingStore,
}

#[wasm_bindgen]
impl Directory {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Directory {
        Directory::default()
    }

    /// Build a directory from a JSON array of existing listings
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed_json: &str) -> Result<Directory, JsValue> {
        let store = ListingStore::from_seed_json(seed_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid seed data: {}", e)))?;
        Ok(Directory { store })
    }

    /// Submit the admin form (JSON). Returns the new listing as JSON, or
    /// throws the validation error as JSON `{ field, message, message_id }`.
    pub fn create(&mut self, form_json: &str) -> Result<String, JsValue> {
        let created = self.create_json(form_json).map_err(|e| JsValue::from_str(&e))?;
        console::log_1(&"Listing submitted for review".into());
        Ok(created)
    }

    #[wasm_bindgen(js_name = deleteListing)]
    pub fn delete(&mut self, id: &str) -> bool {
        self.store.delete(id)
    }

    pub fn approve(&mut self, id: &str) -> bool {
        self.store.approve(id)
    }

    pub fn reject(&mut self, id: &str) -> bool {
        self.store.reject(id)
    }

    /// Approved listings matching the search text and category label
    /// ("all", "Semua" or a category)
    #[wasm_bindgen(js_name = publicQuery)]
    pub fn public_query(&self, search: &str, category: &str) -> Result<String, JsValue> {
        self.public_query_json(search, category)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// `{ pending, approved, rejected }` as JSON
    #[wasm_bindgen(js_name = adminPartition)]
    pub fn admin_partition(&self) -> Result<String, JsValue> {
        to_json(&self.store.admin_partition()).map_err(|e| JsValue::from_str(&e))
    }

    /// Approved listings per category as `[{ value, label, count }]`
    #[wasm_bindgen(js_name = categoryStats)]
    pub fn category_stats(&self) -> Result<String, JsValue> {
        self.category_stats_json().map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = pendingCount)]
    pub fn pending_count(&self) -> usize {
        self.store.pending_count()
    }

    pub fn get(&self, id: &str) -> Result<Option<String>, JsValue> {
        self.store
            .get(id)
            .map(to_json)
            .transpose()
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Detail view with contact links and the id-ID joined date
    pub fn detail(&self, id: &str, offset_hours: i32) -> Result<Option<String>, JsValue> {
        self.detail_json(id, offset_hours)
            .map_err(|e| JsValue::from_str(&e))
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        to_json(&self.store.snapshot()).map_err(|e| JsValue::from_str(&e))
    }

    /// Register a callback receiving each change event as JSON. Returns a
    /// handle (a `BigInt` in JavaScript) for [`Directory::unsubscribe`].
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u64 {
        let subscription = self.store.subscribe(move |event| {
            let payload = match serde_json::to_string(event) {
                Ok(payload) => payload,
                Err(e) => {
                    console::error_1(&format!("Failed to encode change event: {}", e).into());
                    return;
                }
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(&payload)) {
                console::error_2(&"Directory subscriber failed:".into(), &err);
            }
        });
        subscription.id()
    }

    pub fn unsubscribe(&mut self, handle: u64) -> bool {
        self.store.unsubscribe(Subscription::from(handle))
    }
}

impl Directory {
    fn create_json(&mut self, form_json: &str) -> Result<String, String> {
        let form: ListingForm =
            serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))?;
        let listing = form
            .into_input()
            .and_then(|input| self.store.create(input))
            .map_err(|e| to_json(&e).unwrap_or_else(|_| e.to_string()))?;
        to_json(&listing)
    }

    fn category_stats_json(&self) -> Result<String, String> {
        let stats: Vec<CategoryStat> = self
            .store
            .admin_partition()
            .approved_by_category()
            .into_iter()
            .map(|stat| CategoryStat {
                value: stat.category.to_string(),
                label: stat.category.label_id(),
                count: stat.count,
            })
            .collect();
        to_json(&stats)
    }

    fn public_query_json(&self, search: &str, category: &str) -> Result<String, String> {
        let filter: CategoryFilter = category.parse()?;
        to_json(&self.store.public_query(search, filter))
    }

    fn detail_json(&self, id: &str, offset_hours: i32) -> Result<Option<String>, String> {
        let Some(listing) = self.store.get(id) else {
            return Ok(None);
        };
        let detail = ListingDetail {
            listing,
            coordinates_label: listing.coordinates.to_string(),
            joined_since: shared::format_joined_date(
                listing.created_at,
                shared::offset_hours(offset_hours),
            ),
            whatsapp_link: listing.whatsapp_link(),
            phone_link: listing.phone_link(),
        };
        to_json(&detail).map(Some)
    }
}

/// The closed category set as `[{ value, label }]`, English value and
/// Indonesian label
#[wasm_bindgen]
pub fn categories() -> String {
    categories_json()
}

fn categories_json() -> String {
    let options: Vec<CategoryOption> = Category::ALL
        .iter()
        .map(|c| CategoryOption {
            value: c.to_string(),
            label: c.label_id(),
        })
        .collect();
    to_json(&options).unwrap_or_else(|_| "[]".to_string())
}

/// Format an ISO-8601 timestamp as an id-ID long date
#[wasm_bindgen(js_name = formatJoinedDate)]
pub fn format_joined_date(iso: &str, offset_hours: i32) -> Result<String, JsValue> {
    joined_date(iso, offset_hours).map_err(|e| JsValue::from_str(&e))
}

fn joined_date(iso: &str, offset_hours: i32) -> Result<String, String> {
    let created_at = chrono::DateTime::parse_from_rfc3339(iso)
        .map_err(|e| format!("Invalid timestamp '{}': {}", iso, e))?
        .with_timezone(&chrono::Utc);
    Ok(shared::format_joined_date(
        created_at,
        shared::offset_hours(offset_hours),
    ))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"{
        "name": "Toko A",
        "category": "Makanan",
        "description": "d",
        "address": "a",
        "lat": "-6.2",
        "lng": "106.8",
        "photoUrl": "http://x/1.jpg",
        "phone": "",
        "whatsapp": "6281234567890"
    }"#;

    fn created_id(directory: &mut Directory) -> String {
        let created: serde_json::Value =
            serde_json::from_str(&directory.create_json(FORM).unwrap()).unwrap();
        assert_eq!(created["status"], "pending");
        assert!(created.get("phone").is_none());
        created["id"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_create_and_publish() {
        let mut directory = Directory::new();
        let id = created_id(&mut directory);

        assert_eq!(directory.public_query_json("", "all").unwrap(), "[]");
        assert!(directory.approve(&id));

        let visible: serde_json::Value =
            serde_json::from_str(&directory.public_query_json("toko", "Semua").unwrap()).unwrap();
        assert_eq!(visible.as_array().unwrap().len(), 1);

        let drinks = directory.public_query_json("toko", "Beverage").unwrap();
        assert_eq!(drinks, "[]");

        assert!(directory.delete(&id));
        assert_eq!(directory.pending_count(), 0);
    }

    fn create_error(directory: &mut Directory, form_json: &str) -> serde_json::Value {
        let err = directory.create_json(form_json).unwrap_err();
        serde_json::from_str(&err).unwrap()
    }

    #[test]
    fn test_validation_error_is_json() {
        let mut directory = Directory::new();
        let value = create_error(
            &mut directory,
            r#"{ "name": "Toko A", "category": "Jasa", "lat": "x" }"#,
        );
        assert_eq!(value["field"], "description");
        assert_eq!(value["message_id"], "Deskripsi wajib diisi");
        assert_eq!(directory.pending_count(), 0);
    }

    #[test]
    fn test_category_required_in_form() {
        let mut directory = Directory::new();
        let without = FORM.replace(r#""category": "Makanan","#, "");

        let missing = create_error(&mut directory, &without);
        assert_eq!(missing["field"], "category");
        assert_eq!(missing["message_id"], "Kategori wajib diisi");

        let unknown = create_error(&mut directory, &FORM.replace("Makanan", "Elektronik"));
        assert_eq!(unknown["field"], "category");
        assert!(unknown["message"].as_str().unwrap().contains("Elektronik"));

        assert!(directory.store.is_empty());
    }

    #[test]
    fn test_category_stats_count_approved_only() {
        let mut directory = Directory::new();
        let id = created_id(&mut directory);
        created_id(&mut directory);
        directory.approve(&id);

        let stats: serde_json::Value =
            serde_json::from_str(&directory.category_stats_json().unwrap()).unwrap();
        assert_eq!(stats.as_array().unwrap().len(), 4);
        assert_eq!(stats[0]["value"], "Food");
        assert_eq!(stats[0]["label"], "Makanan");
        assert_eq!(stats[0]["count"], 1);
        assert_eq!(stats[1]["count"], 0);
    }

    #[test]
    fn test_subscription_handles_round_trip() {
        let mut directory = Directory::new();
        let handle = directory.store.subscribe(|_| {}).id();
        assert!(directory.unsubscribe(handle));
        assert!(!directory.unsubscribe(handle));
    }

    #[test]
    fn test_unknown_category_filter() {
        let directory = Directory::new();
        assert!(directory.public_query_json("", "Elektronik").is_err());
    }

    #[test]
    fn test_detail_view() {
        let mut directory = Directory::new();
        let id = created_id(&mut directory);

        let detail: serde_json::Value =
            serde_json::from_str(&directory.detail_json(&id, 7).unwrap().unwrap()).unwrap();
        assert_eq!(detail["coordinatesLabel"], "-6.2, 106.8");
        assert_eq!(detail["whatsappLink"], "https://wa.me/6281234567890");
        assert!(detail["phoneLink"].is_null());
        assert_eq!(detail["listing"]["id"], id.as_str());

        assert_eq!(directory.detail_json("missing", 7).unwrap(), None);
    }

    #[test]
    fn test_categories_and_dates() {
        let options: serde_json::Value = serde_json::from_str(&categories_json()).unwrap();
        assert_eq!(options[0]["value"], "Food");
        assert_eq!(options[3]["label"], "Kerajinan");

        assert_eq!(
            joined_date("2024-08-16T20:00:00Z", 7).unwrap(),
            "17 Agustus 2024"
        );
        assert!(joined_date("yesterday", 7).is_err());
    }
}
