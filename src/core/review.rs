//! Review operations: posting, the public paginated listing, editing and deleting.
//!
//! The listing is public. Posting requires an authenticated requester, which the web
//! layer enforces at submission time only.

use crate::{
    core::record::{RecordId, RecordKind, ensure_can_mutate},
    entities::{Review, review},
    errors::{Error, Result},
    forms::ReviewForm,
};
use sea_orm::{ActiveModelTrait, PaginatorTrait, QueryOrder, QuerySelect, Select, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Reviews shown per listing page.
pub const REVIEWS_PAGE_SIZE: u64 = 6;
/// Reviews shown in the "latest" preview list.
pub const LATEST_REVIEWS_LIMIT: u64 = 4;

/// Raw query parameters of the review listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewQuery {
    /// `all`, `5`, `4plus` or `3plus`
    pub rating: Option<String>,
    /// `newest`, `oldest`, `rating_high` or `rating_low`
    pub sort: Option<String>,
    /// 1-indexed page number
    pub page: Option<String>,
}

/// Minimum-rating filter of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingFilter {
    /// No filter
    #[default]
    All,
    /// Only five-star reviews
    Five,
    /// Four stars and up
    FourPlus,
    /// Three stars and up
    ThreePlus,
}

impl RatingFilter {
    /// Maps the `rating` parameter; unknown values mean no filter.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("5") => Self::Five,
            Some("4plus") => Self::FourPlus,
            Some("3plus") => Self::ThreePlus,
            _ => Self::All,
        }
    }

    fn apply(self, query: Select<Review>) -> Select<Review> {
        match self {
            Self::All => query,
            Self::Five => query.filter(review::Column::Rating.eq(5)),
            Self::FourPlus => query.filter(review::Column::Rating.gte(4)),
            Self::ThreePlus => query.filter(review::Column::Rating.gte(3)),
        }
    }
}

/// Ordering of the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    /// Most recent first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
    /// Highest rating first, then most recent
    RatingHigh,
    /// Lowest rating first, then most recent
    RatingLow,
}

impl ReviewSort {
    /// Maps the `sort` parameter; unknown values sort newest first.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => Self::Oldest,
            Some("rating_high") => Self::RatingHigh,
            Some("rating_low") => Self::RatingLow,
            _ => Self::Newest,
        }
    }

    fn apply(self, query: Select<Review>) -> Select<Review> {
        match self {
            Self::Newest => query.order_by_desc(review::Column::CreatedAt),
            Self::Oldest => query.order_by_asc(review::Column::CreatedAt),
            Self::RatingHigh => query
                .order_by_desc(review::Column::Rating)
                .order_by_desc(review::Column::CreatedAt),
            Self::RatingLow => query
                .order_by_asc(review::Column::Rating)
                .order_by_desc(review::Column::CreatedAt),
        }
    }
}

/// One page of the review listing.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewPage {
    /// Reviews on this page
    pub reviews: Vec<review::Model>,
    /// Current page, 1-indexed
    pub page: u64,
    /// Total number of pages, at least 1
    pub num_pages: u64,
    /// Number of reviews matching the filter
    pub total: u64,
    /// Filter in effect
    pub rating_filter: RatingFilter,
    /// Ordering in effect
    pub sort: ReviewSort,
}

impl ReviewPage {
    /// True when a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.num_pages
    }

    /// True when an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Resolves the `page` parameter against the number of pages.
///
/// Non-numeric input selects the first page; out-of-range numbers clamp to the nearest
/// valid page.
#[must_use]
pub fn resolve_page(raw: Option<&str>, num_pages: u64) -> u64 {
    let last = num_pages.max(1);
    match raw.map(str::trim).and_then(|value| value.parse::<i64>().ok()) {
        Some(page) if page < 1 => 1,
        Some(page) => u64::try_from(page).map_or(last, |page| page.min(last)),
        None => 1,
    }
}

/// Posts a review.
///
/// # Errors
/// Returns [`Error::Validation`] when the form is invalid.
#[instrument(skip(db, form))]
pub async fn create_review(
    db: &DatabaseConnection,
    form: &ReviewForm,
    requester: Option<&str>,
) -> Result<review::Model> {
    let data = form.clean()?;

    let review = review::ActiveModel {
        id: Set(RecordId::generate().into_string()),
        user_id: Set(requester.map(str::to_string)),
        full_name: Set(data.full_name),
        email: Set(data.email),
        rating: Set(data.rating),
        comment: Set(data.comment),
        created_at: Set(chrono::Utc::now()),
    };

    let result = review.insert(db).await?;
    info!(
        "Review {} ({}/5) posted by {:?}",
        result.id, result.rating, requester
    );
    Ok(result)
}

/// Returns the requested page of the public review listing.
pub async fn list_reviews(db: &DatabaseConnection, query: &ReviewQuery) -> Result<ReviewPage> {
    let rating_filter = RatingFilter::from_param(query.rating.as_deref());
    let sort = ReviewSort::from_param(query.sort.as_deref());

    let select = sort
        .apply(rating_filter.apply(Review::find()))
        .order_by_desc(review::Column::Id);
    let paginator = select.paginate(db, REVIEWS_PAGE_SIZE);
    let totals = paginator.num_items_and_pages().await?;

    let num_pages = totals.number_of_pages.max(1);
    let page = resolve_page(query.page.as_deref(), num_pages);
    let reviews = paginator.fetch_page(page - 1).await?;

    debug!(
        "Review listing page {}/{} with {} of {} reviews",
        page,
        num_pages,
        reviews.len(),
        totals.number_of_items
    );
    Ok(ReviewPage {
        reviews,
        page,
        num_pages,
        total: totals.number_of_items,
        rating_filter,
        sort,
    })
}

/// The most recent reviews, regardless of any listing filter.
pub async fn latest_reviews(db: &DatabaseConnection) -> Result<Vec<review::Model>> {
    Review::find()
        .order_by_desc(review::Column::CreatedAt)
        .limit(LATEST_REVIEWS_LIMIT)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Loads a review the requester is allowed to change.
///
/// # Errors
/// [`Error::NotFound`] for malformed or unknown ids, [`Error::Forbidden`] when the review
/// belongs to someone else.
pub async fn get_review_for_update(
    db: &DatabaseConnection,
    raw_id: &str,
    requester: &str,
) -> Result<review::Model> {
    let id = RecordId::parse(RecordKind::Review, raw_id)?;
    let review = Review::find_by_id(id.into_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            kind: RecordKind::Review,
            id: raw_id.to_string(),
        })?;
    ensure_can_mutate(
        RecordKind::Review,
        &review.id,
        review.user_id.as_deref(),
        requester,
    )?;
    Ok(review)
}

/// Replaces the editable fields of a review.
///
/// Ownership is checked before the form is validated, so a stranger learns nothing about
/// the form rules.
///
/// # Errors
/// [`Error::NotFound`], [`Error::Forbidden`] or [`Error::Validation`]; the stored review
/// is unchanged on any failure.
#[instrument(skip(db, form))]
pub async fn update_review(
    db: &DatabaseConnection,
    raw_id: &str,
    form: &ReviewForm,
    requester: &str,
) -> Result<review::Model> {
    let existing = get_review_for_update(db, raw_id, requester).await?;
    let data = form.clean()?;

    let mut review: review::ActiveModel = existing.into();
    review.full_name = Set(data.full_name);
    review.email = Set(data.email);
    review.rating = Set(data.rating);
    review.comment = Set(data.comment);

    let result = review.update(db).await?;
    info!("Review {} updated by {}", result.id, requester);
    Ok(result)
}

/// Deletes a review.
///
/// # Errors
/// Same as [`get_review_for_update`].
#[instrument(skip(db))]
pub async fn delete_review(db: &DatabaseConnection, raw_id: &str, requester: &str) -> Result<()> {
    let review = get_review_for_update(db, raw_id, requester).await?;
    Review::delete_by_id(review.id.clone()).exec(db).await?;
    info!("Review {} deleted by {}", review.id, requester);
    Ok(())
}

/// Number of stored reviews.
pub async fn count_reviews(db: &DatabaseConnection) -> Result<u64> {
    Review::find().count(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_resolve_page_clamps() {
        assert_eq!(resolve_page(None, 3), 1);
        assert_eq!(resolve_page(Some("abc"), 3), 1);
        assert_eq!(resolve_page(Some("2"), 3), 2);
        assert_eq!(resolve_page(Some("0"), 3), 1);
        assert_eq!(resolve_page(Some("-4"), 3), 1);
        assert_eq!(resolve_page(Some("99"), 3), 3);
        assert_eq!(resolve_page(Some("2"), 0), 1);
    }

    #[test]
    fn test_params_fall_back_to_defaults() {
        assert_eq!(RatingFilter::from_param(Some("4plus")), RatingFilter::FourPlus);
        assert_eq!(RatingFilter::from_param(Some("2plus")), RatingFilter::All);
        assert_eq!(ReviewSort::from_param(Some("rating_low")), ReviewSort::RatingLow);
        assert_eq!(ReviewSort::from_param(None), ReviewSort::Newest);
    }

    #[tokio::test]
    async fn test_listing_pages_and_filters() -> Result<()> {
        let db = setup_test_db().await?;
        for rating in [5, 5, 4, 3, 2, 1, 5, 4] {
            create_test_review(&db, Some("alice"), rating).await?;
        }

        let first = list_reviews(&db, &ReviewQuery::default()).await?;
        assert_eq!(first.total, 8);
        assert_eq!(first.num_pages, 2);
        assert_eq!(first.reviews.len(), 6);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let clamped = list_reviews(
            &db,
            &ReviewQuery {
                page: Some("7".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(clamped.page, 2);
        assert_eq!(clamped.reviews.len(), 2);

        let four_plus = list_reviews(
            &db,
            &ReviewQuery {
                rating: Some("4plus".to_string()),
                sort: Some("rating_low".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(four_plus.total, 5);
        assert!(four_plus.reviews.iter().all(|r| r.rating >= 4));
        assert_eq!(four_plus.reviews[0].rating, 4);

        let fives = list_reviews(
            &db,
            &ReviewQuery {
                rating: Some("5".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(fives.total, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_listing_has_one_page() -> Result<()> {
        let db = setup_test_db().await?;
        let page = list_reviews(
            &db,
            &ReviewQuery {
                page: Some("3".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(page.page, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.reviews.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_latest_reviews_limit() -> Result<()> {
        let db = setup_test_db().await?;
        for _ in 0..6 {
            create_test_review(&db, None, 3).await?;
        }
        let latest = latest_reviews(&db).await?;
        assert_eq!(latest.len(), 4);
        assert!(latest.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_review() -> Result<()> {
        let db = setup_test_db().await?;
        let review = create_test_review(&db, Some("alice"), 2).await?;

        let mut form = ReviewForm::from(&review);
        form.rating = "5".to_string();
        form.comment = "They fixed everything".to_string();

        let denied = update_review(&db, &review.id, &form, "bob").await;
        assert!(matches!(denied.unwrap_err(), Error::Forbidden { .. }));

        let updated = update_review(&db, &review.id, &form, "alice").await?;
        assert_eq!(updated.rating, 5);
        assert_eq!(updated.comment, "They fixed everything");
        assert_eq!(updated.created_at, review.created_at);
        assert_eq!(updated.user_id.as_deref(), Some("alice"));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_review_invalid_form_keeps_record() -> Result<()> {
        let db = setup_test_db().await?;
        let review = create_test_review(&db, Some("alice"), 4).await?;

        let mut form = ReviewForm::from(&review);
        form.rating = "9".to_string();
        let result = update_review(&db, &review.id, &form, "alice").await;
        assert!(matches!(result.unwrap_err(), Error::Validation(_)));

        let stored = Review::find_by_id(review.id.clone()).one(&db).await?.unwrap();
        assert_eq!(stored, review);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_review_ownership() -> Result<()> {
        let db = setup_test_db().await?;
        let anonymous = create_test_review(&db, None, 3).await?;
        let owned = create_test_review(&db, Some("alice"), 5).await?;

        delete_review(&db, &anonymous.id, "bob").await?;

        let denied = delete_review(&db, &owned.id, "bob").await;
        assert!(matches!(denied.unwrap_err(), Error::Forbidden { .. }));
        assert!(Review::find_by_id(owned.id.clone()).one(&db).await?.is_some());

        let malformed = delete_review(&db, "not-a-valid-id", "bob").await;
        assert!(matches!(malformed.unwrap_err(), Error::NotFound { .. }));
        assert_eq!(count_reviews(&db).await?, 1);
        Ok(())
    }
}
