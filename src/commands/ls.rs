use crate::cache::QueryCache;
use crate::commands::parse_filter_arg;
use crate::error::{PustakaError, Result};
use crate::grid::{ColumnSpec, FilterKind, GridState, render};
use crate::query::{FilterState, SortDirection};
use crate::types::Resource;

/// Options for listing a resource
pub struct LsOptions {
    pub resource: Resource,
    pub filters: Vec<String>,
    pub sort: Option<String>,
    pub desc: bool,
    pub page: u32,
    pub limit: u32,
    /// Bypass the retained cache entry.
    pub refresh: bool,
}

/// Default column layout per resource.
pub fn default_columns(resource: Resource) -> Vec<ColumnSpec> {
    match resource {
        Resource::Books => vec![
            ColumnSpec::new("id", "ID").width(60).sortable(),
            ColumnSpec::new("title", "Title").sortable().filter(FilterKind::Text),
            ColumnSpec::new("jenis_buku.code", "Type").filter(FilterKind::Dropdown),
            ColumnSpec::new("jenjang_studi.code", "Level")
                .sortable()
                .filter(FilterKind::Dropdown),
            ColumnSpec::new("kurikulum.code", "Curriculum").filter(FilterKind::Dropdown),
            ColumnSpec::new("penerbit.name", "Publisher").filter(FilterKind::Dropdown),
            ColumnSpec::new("price", "Price").sortable().filter(FilterKind::Number),
            ColumnSpec::new("stock", "Stock").sortable().filter(FilterKind::Number),
        ],
        Resource::Sales => vec![
            ColumnSpec::new("id", "ID").width(60).sortable(),
            ColumnSpec::new("invoice_number", "Invoice").sortable().filter(FilterKind::Text),
            ColumnSpec::new("customer.name", "Customer").filter(FilterKind::Text),
            ColumnSpec::new("city.name", "City").filter(FilterKind::Dropdown),
            ColumnSpec::new("expedition.name", "Expedition").filter(FilterKind::Dropdown),
            ColumnSpec::new("payment.method", "Payment").filter(FilterKind::Dropdown),
            ColumnSpec::new("total_amount", "Total").sortable().filter(FilterKind::Number),
            ColumnSpec::new("status", "Status").sortable().filter(FilterKind::Dropdown),
            ColumnSpec::new("created_at", "Date").sortable().filter(FilterKind::Date),
        ],
        Resource::Purchases => vec![
            ColumnSpec::new("id", "ID").width(60).sortable(),
            ColumnSpec::new("invoice_number", "Invoice").sortable().filter(FilterKind::Text),
            ColumnSpec::new("supplier.name", "Supplier").filter(FilterKind::Text),
            ColumnSpec::new("total_amount", "Total").sortable().filter(FilterKind::Number),
            ColumnSpec::new("status", "Status").sortable().filter(FilterKind::Dropdown),
            ColumnSpec::new("created_at", "Date").sortable().filter(FilterKind::Date),
        ],
        Resource::Users => vec![
            ColumnSpec::new("id", "ID").width(60).sortable(),
            ColumnSpec::new("username", "Username").sortable().filter(FilterKind::Text),
            ColumnSpec::new("name", "Name").sortable().filter(FilterKind::Text),
            ColumnSpec::new("role", "Role").filter(FilterKind::Dropdown),
        ],
        // Reference data shares a minimal code/name layout.
        Resource::Publishers | Resource::Curricula | Resource::Cities | Resource::Expeditions => {
            vec![
                ColumnSpec::new("id", "ID").width(60).sortable(),
                ColumnSpec::new("code", "Code").sortable().filter(FilterKind::Text),
                ColumnSpec::new("name", "Name").sortable().filter(FilterKind::Text),
            ]
        }
    }
}

/// List one page of a resource as a table.
pub async fn cmd_ls(cache: &QueryCache, options: LsOptions) -> Result<()> {
    let mut grid = GridState::new(options.resource, default_columns(options.resource));

    let mut filters = FilterState::new();
    for arg in &options.filters {
        let (field, value) = parse_filter_arg(arg)?;
        filters.insert(field, value);
    }
    grid.set_filters(filters);

    if let Some(field) = &options.sort {
        grid.toggle_sort(field);
        if options.desc {
            grid.toggle_sort(field);
        }
        if grid.sort().is_none() {
            return Err(PustakaError::Other(format!(
                "'{}' is not a sortable column",
                field
            )));
        }
        debug_assert_eq!(
            grid.sort().map(|s| s.direction),
            Some(if options.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            })
        );
    }

    grid.set_limit(options.limit);
    grid.set_page(options.page);

    if options.refresh {
        grid.force_refresh(cache).await;
    } else {
        grid.refresh(cache).await;
    }

    // A failed fetch with nothing cached leaves an empty grid; surface the
    // error instead of printing a bare table.
    if let Some(err) = grid.error()
        && grid.rows().is_empty()
    {
        return Err(PustakaError::Api(err.to_string()));
    }

    println!("{}", render::render_table(&grid));
    let footer = render::render_footer(&grid);
    if !footer.is_empty() {
        println!("{}", footer);
    }
    Ok(())
}
