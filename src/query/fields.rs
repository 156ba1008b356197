//! Static UI-field to backend-parameter maps.
//!
//! Grid columns address rows by dot-path (`jenjang_studi.code` reaches into
//! the nested curriculum object), but the list endpoints take flat parameter
//! names (`jenjang_studi_code`). These tables pin the translation per
//! resource.
//!
//! Unmapped fields pass through unchanged. That identity fallback is
//! deliberate: a newly added column keeps filtering (the backend ignores
//! unknown parameters) instead of being silently dropped here.

use crate::types::Resource;

/// Book columns joined from reference tables.
const BOOK_FIELDS: &[(&str, &str)] = &[
    ("jenis_buku.code", "jenis_buku_code"),
    ("jenjang_studi.code", "jenjang_studi_code"),
    ("kurikulum.code", "kurikulum_code"),
    ("penerbit.name", "penerbit_name"),
    ("penerbit.id", "penerbit_id"),
];

const SALES_FIELDS: &[(&str, &str)] = &[
    ("customer.name", "customer_name"),
    ("city.name", "city_name"),
    ("expedition.name", "expedition_name"),
    ("payment.method", "payment_method"),
];

const PURCHASE_FIELDS: &[(&str, &str)] = &[
    ("supplier.name", "supplier_name"),
    ("penerbit.name", "penerbit_name"),
];

const USER_FIELDS: &[(&str, &str)] = &[("role.name", "role_name")];

fn map_for(resource: Resource) -> &'static [(&'static str, &'static str)] {
    match resource {
        Resource::Books => BOOK_FIELDS,
        Resource::Sales => SALES_FIELDS,
        Resource::Purchases => PURCHASE_FIELDS,
        Resource::Users => USER_FIELDS,
        // Flat reference tables filter by their own column names.
        Resource::Publishers | Resource::Curricula | Resource::Cities | Resource::Expeditions => {
            &[]
        }
    }
}

/// Translate a UI field path into the backend parameter name.
pub fn backend_field(resource: Resource, ui_field: &str) -> String {
    for (ui, backend) in map_for(resource) {
        if *ui == ui_field {
            return (*backend).to_string();
        }
    }
    ui_field.to_string()
}
