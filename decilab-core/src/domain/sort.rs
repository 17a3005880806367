//! Lexicographic multi-key ordering over record collections.

use std::cmp::Ordering;

use super::record::PriceRecord;

/// An "a precedes b" predicate for one key dimension.
///
/// Must be a strict, consistent, irreflexive ordering on its field — simple
/// field projections with `<` satisfy this.
pub type LessFn<R> = fn(&R, &R) -> bool;

/// Prioritized chain of single-key comparators.
///
/// Holds only the chain; no record state survives between `sort` calls.
#[derive(Debug, Clone)]
pub struct MultiSorter<R> {
    less: Vec<LessFn<R>>,
}

/// Build a sorter that orders by the given comparators, first decisive
/// comparator wins.
///
/// # Panics
/// Panics on an empty chain: ordering by nothing is undefined, and failing
/// fast beats silently leaving the input untouched.
pub fn ordered_by<R>(less: Vec<LessFn<R>>) -> MultiSorter<R> {
    assert!(
        !less.is_empty(),
        "ordered_by requires at least one comparator"
    );
    MultiSorter { less }
}

impl<R> MultiSorter<R> {
    /// Stable in-place sort.
    ///
    /// Ties cascade down the chain; records equal under every comparator keep
    /// their relative input order.
    pub fn sort(&self, records: &mut [R]) {
        records.sort_by(|p, q| self.compare(p, q));
    }

    fn compare(&self, p: &R, q: &R) -> Ordering {
        // Every comparator but the last only decides on strict inequality in
        // either direction; equality falls through to the next key.
        for less in &self.less[..self.less.len() - 1] {
            if less(p, q) {
                return Ordering::Less;
            }
            if less(q, p) {
                return Ordering::Greater;
            }
        }

        // The final comparator's verdict is taken unconditionally; mutual
        // equality is a stable no-preference.
        let last = self.less[self.less.len() - 1];
        if last(p, q) {
            Ordering::Less
        } else if last(q, p) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

pub fn by_uuid(a: &PriceRecord, b: &PriceRecord) -> bool {
    a.uuid < b.uuid
}

pub fn by_product(a: &PriceRecord, b: &PriceRecord) -> bool {
    a.product_id < b.product_id
}

pub fn by_customer(a: &PriceRecord, b: &PriceRecord) -> bool {
    a.customer_id < b.customer_id
}

pub fn by_date(a: &PriceRecord, b: &PriceRecord) -> bool {
    a.purchase_date < b.purchase_date
}

pub fn by_document_number(a: &PriceRecord, b: &PriceRecord) -> bool {
    a.document_number < b.document_number
}

pub fn by_document_line_number(a: &PriceRecord, b: &PriceRecord) -> bool {
    a.document_line_number < b.document_line_number
}

pub fn by_price(a: &PriceRecord, b: &PriceRecord) -> bool {
    a.price < b.price
}
