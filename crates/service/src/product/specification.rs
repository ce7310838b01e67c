//! Composable product predicates, compiled to a SQL condition or evaluated
//! in memory.

use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};

use models::product;

use super::Product;

const LIKE_ESCAPE: char = '\\';

/// Conjunction of optional constraints. An empty filter matches everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductFilter {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub category_codes: Vec<String>,
    pub name: Option<String>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.category_codes.is_empty()
            && self.name_needle().is_none()
    }

    /// `None` when nothing constrains the query.
    pub fn condition(&self) -> Option<Condition> {
        if self.is_empty() {
            return None;
        }
        let mut cond = Condition::all();
        if let Some(min) = self.min_price {
            cond = cond.add(product::Column::Price.gte(min));
        }
        if let Some(max) = self.max_price {
            cond = cond.add(product::Column::Price.lte(max));
        }
        if !self.category_codes.is_empty() {
            cond = cond.add(product::Column::CategoryCode.is_in(self.category_codes.iter().cloned()));
        }
        if let Some(needle) = self.name_needle() {
            let pattern = format!("%{}%", escape_like(&needle));
            cond = cond.add(
                Expr::expr(Func::lower(Expr::col((product::Entity, product::Column::Name))))
                    .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            );
        }
        Some(cond)
    }

    pub fn matches(&self, p: &Product) -> bool {
        if self.min_price.is_some_and(|min| p.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| p.price > max) {
            return false;
        }
        if !self.category_codes.is_empty() {
            match p.category_code() {
                Some(code) if self.category_codes.iter().any(|c| c == code) => {}
                _ => return false,
            }
        }
        match self.name_needle() {
            Some(needle) => p.name.to_lowercase().contains(&needle),
            None => true,
        }
    }

    fn name_needle(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_lowercase)
    }
}

fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}
