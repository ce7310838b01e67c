//! Query-string parameters for product listing and their resolved form.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use models::product;

use super::specification::ProductFilter;
use super::Product;
use crate::errors::ServiceError;
use crate::pagination::{PageLimits, PageRequest, SortDirection};

/// Raw listing parameters as they arrive on `GET /api/products`.
///
/// `categoryCodes` may repeat (`?categoryCodes=A&categoryCodes=B`) and each
/// value may itself be comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQueryParams {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    #[serde(default)]
    pub category_codes: Vec<String>,
    pub name: Option<String>,
}

/// Columns a listing may be sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductSortField {
    #[default]
    Id,
    Name,
    Price,
    Quantity,
    Description,
    Category,
}

impl ProductSortField {
    pub fn column(self) -> product::Column {
        match self {
            Self::Id => product::Column::Id,
            Self::Name => product::Column::Name,
            Self::Price => product::Column::Price,
            Self::Quantity => product::Column::Quantity,
            Self::Description => product::Column::Description,
            Self::Category => product::Column::CategoryCode,
        }
    }

    /// In-memory ordering matching `column()`.
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Price => a.price.cmp(&b.price),
            Self::Quantity => a.quantity.cmp(&b.quantity),
            Self::Description => a.description.cmp(&b.description),
            Self::Category => a.category_code().cmp(&b.category_code()),
        }
    }
}

impl FromStr for ProductSortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "quantity" => Ok(Self::Quantity),
            "description" => Ok(Self::Description),
            "category" | "categoryCode" => Ok(Self::Category),
            other => Err(format!(
                "sortBy must be one of id, name, price, quantity, description, category; got '{other}'"
            )),
        }
    }
}

/// Listing request after defaults, clamping and whitelisting.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: ProductSortField,
    pub direction: SortDirection,
    pub page: PageRequest,
}

impl ProductQuery {
    pub fn from_params(params: ProductQueryParams, limits: PageLimits) -> Result<Self, ServiceError> {
        let sort = match params.sort_by.as_deref() {
            Some(s) if !s.trim().is_empty() => s.parse().map_err(ServiceError::InvalidQuery)?,
            _ => ProductSortField::default(),
        };
        let direction = match params.direction.as_deref() {
            Some(d) if !d.trim().is_empty() => d.parse().map_err(ServiceError::InvalidQuery)?,
            _ => SortDirection::default(),
        };
        let category_codes = params
            .category_codes
            .iter()
            .flat_map(|raw| raw.split(','))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        let name = params.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let page = PageRequest::normalize(params.page, params.size, limits);
        // Offsets are bound as BIGINT.
        if page.page.checked_mul(page.size).map_or(true, |offset| offset > i64::MAX as u64) {
            return Err(ServiceError::InvalidQuery(format!(
                "page {} is out of range for size {}",
                page.page, page.size
            )));
        }

        Ok(Self {
            filter: ProductFilter {
                min_price: params.min_price,
                max_price: params.max_price,
                category_codes,
                name,
            },
            sort,
            direction,
            page,
        })
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            filter: ProductFilter::default(),
            sort: ProductSortField::Id,
            direction: SortDirection::Asc,
            page: PageRequest::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(params: ProductQueryParams) -> Result<ProductQuery, ServiceError> {
        ProductQuery::from_params(params, PageLimits::default())
    }

    #[test]
    fn defaults_are_id_ascending_first_page() {
        let q = parse(ProductQueryParams::default()).unwrap();
        assert_eq!(q, ProductQuery::default());
        assert_eq!(q.page, PageRequest { page: 0, size: 10 });
    }

    #[test]
    fn category_codes_split_on_commas_and_drop_blanks() {
        let q = parse(ProductQueryParams {
            category_codes: vec!["ELEC, BOOK".into(), "".into(), "TOYS".into()],
            ..Default::default()
        })
        .unwrap();
        assert_eq!(q.filter.category_codes, ["ELEC", "BOOK", "TOYS"]);
    }

    #[test]
    fn unknown_sort_field_is_invalid() {
        let err = parse(ProductQueryParams { sort_by: Some("password".into()), ..Default::default() }).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidQuery(_)));
    }

    #[test]
    fn unknown_direction_is_invalid() {
        let err = parse(ProductQueryParams { direction: Some("up".into()), ..Default::default() }).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidQuery(_)));
    }

    #[test]
    fn category_sort_uses_foreign_key_column() {
        let q = parse(ProductQueryParams {
            sort_by: Some("category".into()),
            direction: Some("DESC".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(q.sort.column(), product::Column::CategoryCode));
        assert_eq!(q.direction, SortDirection::Desc);
    }

    #[test]
    fn oversized_page_is_clamped() {
        let q = parse(ProductQueryParams { size: Some(5000), ..Default::default() }).unwrap();
        assert_eq!(q.page.size, 100);
    }

    #[test]
    fn page_whose_offset_overflows_is_invalid() {
        let err = parse(ProductQueryParams { page: Some(1_844_674_407_370_955_162), size: Some(10), ..Default::default() })
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidQuery(_)));
        let err = parse(ProductQueryParams { page: Some(u64::MAX), ..Default::default() }).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidQuery(_)));

        let last = i64::MAX as u64 / 10;
        let q = parse(ProductQueryParams { page: Some(last), size: Some(10), ..Default::default() }).unwrap();
        assert_eq!(q.page.page, last);
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let params: ProductQueryParams = serde_json::from_value(serde_json::json!({
            "sortBy": "price",
            "minPrice": "10.5",
            "categoryCodes": ["A"]
        }))
        .unwrap();
        assert_eq!(params.sort_by.as_deref(), Some("price"));
        assert_eq!(params.min_price, Some(Decimal::new(105, 1)));
        assert_eq!(params.category_codes, ["A"]);
    }
}
