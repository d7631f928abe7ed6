//! Review ordering

use crate::app::models::Review;
use std::cmp::Ordering;

/// Order two reviews: higher rating first, then newer first
///
/// Reviews without a parsed timestamp sort after dated ones at the same
/// rating, and two undated reviews compare equal. This is a total order, so
/// it is safe to hand to the standard sorts.
pub fn compare_reviews(a: &Review, b: &Review) -> Ordering {
    b.star_rating
        .cmp(&a.star_rating)
        .then_with(|| match (a.timestamp, b.timestamp) {
            (Some(ta), Some(tb)) => tb.cmp(&ta),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Sort reviews in place; equal reviews keep their sheet order
pub fn sort_reviews(reviews: &mut [Review]) {
    reviews.sort_by(compare_reviews);
}
