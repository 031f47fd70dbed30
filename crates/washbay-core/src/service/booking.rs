//! Booking service.
//!
//! Owns the booking creation workflow and the booking lifecycle. Creation is
//! a single-shot validate-then-commit sequence:
//!
//! 1. the customer must exist
//! 2. the service must exist and be active
//! 3. the wash window must end by year 9999 and the availability
//!    collaborator must accept the requested start time
//!
//! Only then is the wash priced, the booking persisted in `pending` status and
//! a confirmation code issued. The first failing check ends the request; no
//! later collaborator is called and nothing is written. There are no retries.

use chrono::Utc;

use washbay_types::booking::{
    window_end, Booking, BookingConfirmation, BookingId, BookingStatus, ConfirmationCode,
    CreateBookingRequest,
};
use washbay_types::error::BookingError;

use crate::repository::booking::{BookingFilter, BookingRepository};
use crate::repository::customer::CustomerRepository;
use crate::repository::service::ServiceRepository;
use crate::service::availability::AvailabilityChecker;
use crate::service::pricing::PricingEngine;

/// Service orchestrating booking creation and status changes.
///
/// Generic over every collaborator so tests can substitute doubles and
/// washbay-core never depends on washbay-infra.
pub struct BookingService<B, C, S, A, P>
where
    B: BookingRepository,
    C: CustomerRepository,
    S: ServiceRepository,
    A: AvailabilityChecker,
    P: PricingEngine,
{
    booking_repo: B,
    customer_repo: C,
    service_repo: S,
    availability: A,
    pricing: P,
}

impl<B, C, S, A, P> BookingService<B, C, S, A, P>
where
    B: BookingRepository,
    C: CustomerRepository,
    S: ServiceRepository,
    A: AvailabilityChecker,
    P: PricingEngine,
{
    pub fn new(booking_repo: B, customer_repo: C, service_repo: S, availability: A, pricing: P) -> Self {
        Self {
            booking_repo,
            customer_repo,
            service_repo,
            availability,
            pricing,
        }
    }

    /// Access the underlying booking repository (for reporting queries).
    pub fn booking_repo(&self) -> &B {
        &self.booking_repo
    }

    /// Validate a booking request and commit a priced, pending booking.
    ///
    /// Collaborator errors (storage, pricing) are returned unchanged.
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingConfirmation, BookingError> {
        if self
            .customer_repo
            .get_by_id(&request.customer_id)
            .await?
            .is_none()
        {
            tracing::debug!(customer_id = %request.customer_id, "booking rejected: unknown customer");
            return Err(BookingError::CustomerNotFound);
        }

        let service = match self.service_repo.get_by_id(&request.service_id).await? {
            Some(service) if service.is_active => service,
            _ => {
                tracing::debug!(service_id = %request.service_id, "booking rejected: service missing or inactive");
                return Err(BookingError::ServiceNotAvailable);
            }
        };

        if window_end(request.scheduled_at, service.duration_minutes).is_none() {
            tracing::debug!(
                service_id = %service.id,
                scheduled_at = %request.scheduled_at,
                "booking rejected: window out of range"
            );
            return Err(BookingError::SlotUnavailable);
        }

        if !self
            .availability
            .is_available(&service.id, request.scheduled_at)
            .await?
        {
            tracing::debug!(
                service_id = %service.id,
                scheduled_at = %request.scheduled_at,
                "booking rejected: slot taken"
            );
            return Err(BookingError::SlotUnavailable);
        }

        let price = self
            .pricing
            .calculate_price(&service, &request.vehicle, &request.location)
            .await?;

        let now = Utc::now();
        let booking = Booking {
            id: BookingId::new(),
            customer_id: request.customer_id,
            service_id: service.id.clone(),
            vehicle: request.vehicle,
            location: request.location,
            scheduled_at: request.scheduled_at,
            duration_minutes: service.duration_minutes,
            status: BookingStatus::Pending,
            price,
            notes: request.notes,
            created_at: now,
            updated_at: now,
        };

        let booking = self.booking_repo.create(&booking).await?;
        let confirmation_code = ConfirmationCode::generate();

        tracing::info!(
            booking_id = %booking.id,
            service = %service.name,
            price = %booking.price,
            "booking created"
        );

        Ok(BookingConfirmation {
            booking,
            estimated_price: price,
            confirmation_code,
        })
    }

    /// Get a booking by ID.
    pub async fn get_booking(&self, id: &BookingId) -> Result<Booking, BookingError> {
        self.booking_repo
            .get_by_id(id)
            .await?
            .ok_or(BookingError::NotFound)
    }

    /// List bookings with optional filtering.
    pub async fn list_bookings(
        &self,
        filter: Option<BookingFilter>,
    ) -> Result<Vec<Booking>, BookingError> {
        Ok(self.booking_repo.list(filter).await?)
    }

    /// Move a booking to its next lifecycle state.
    ///
    /// Only `status` and `updated_at` change; the price stays as quoted.
    pub async fn transition_status(
        &self,
        id: &BookingId,
        next: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let mut booking = self.get_booking(id).await?;

        if !booking.status.can_transition_to(next) {
            return Err(BookingError::InvalidTransition {
                from: booking.status,
                to: next,
            });
        }

        let previous = booking.status;
        booking.status = next;
        booking.updated_at = Utc::now();

        let booking = self.booking_repo.update(&booking).await?;
        tracing::info!(booking_id = %booking.id, from = %previous, to = %next, "booking status changed");
        Ok(booking)
    }

    /// Cancel a pending or confirmed booking.
    pub async fn cancel_booking(&self, id: &BookingId) -> Result<Booking, BookingError> {
        self.transition_status(id, BookingStatus::Cancelled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration};
    use rust_decimal::Decimal;
    use washbay_types::booking::{Location, VehicleClass, VehicleInfo};
    use washbay_types::customer::{Customer, CustomerId};
    use washbay_types::error::{PricingError, RepositoryError};
    use washbay_types::service::{Service, ServiceId};

    // --- Test doubles ---

    /// Per-collaborator call counters shared by all doubles of one harness.
    #[derive(Default)]
    struct Calls {
        customer_lookups: AtomicUsize,
        service_lookups: AtomicUsize,
        availability_checks: AtomicUsize,
        price_quotes: AtomicUsize,
        creates: AtomicUsize,
    }

    impl Calls {
        fn get(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    struct MockCustomers {
        calls: Arc<Calls>,
        known: Vec<Customer>,
    }

    impl CustomerRepository for MockCustomers {
        async fn create(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
            Ok(customer.clone())
        }

        async fn get_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
            self.calls.customer_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.known.iter().find(|c| &c.id == id).cloned())
        }

        async fn get_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
            Ok(self.known.iter().find(|c| c.email == email).cloned())
        }

        async fn list(
            &self,
            _limit: Option<i64>,
            _offset: Option<i64>,
        ) -> Result<Vec<Customer>, RepositoryError> {
            Ok(self.known.clone())
        }
    }

    struct MockServices {
        calls: Arc<Calls>,
        known: Vec<Service>,
    }

    impl ServiceRepository for MockServices {
        async fn create(&self, service: &Service) -> Result<Service, RepositoryError> {
            Ok(service.clone())
        }

        async fn get_by_id(&self, id: &ServiceId) -> Result<Option<Service>, RepositoryError> {
            self.calls.service_lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.known.iter().find(|s| &s.id == id).cloned())
        }

        async fn list(&self, active_only: bool) -> Result<Vec<Service>, RepositoryError> {
            Ok(self
                .known
                .iter()
                .filter(|s| !active_only || s.is_active)
                .cloned()
                .collect())
        }

        async fn update(&self, service: &Service) -> Result<Service, RepositoryError> {
            Ok(service.clone())
        }
    }

    struct MockAvailability {
        calls: Arc<Calls>,
        available: bool,
    }

    impl AvailabilityChecker for MockAvailability {
        async fn is_available(
            &self,
            _service_id: &ServiceId,
            _scheduled_at: DateTime<Utc>,
        ) -> Result<bool, RepositoryError> {
            self.calls.availability_checks.fetch_add(1, Ordering::SeqCst);
            Ok(self.available)
        }
    }

    enum Quote {
        Fixed(Decimal),
        Fails,
    }

    struct MockPricing {
        calls: Arc<Calls>,
        quote: Quote,
    }

    impl PricingEngine for MockPricing {
        async fn calculate_price(
            &self,
            _service: &Service,
            _vehicle: &VehicleInfo,
            _location: &Location,
        ) -> Result<Decimal, PricingError> {
            self.calls.price_quotes.fetch_add(1, Ordering::SeqCst);
            match &self.quote {
                Quote::Fixed(price) => Ok(*price),
                Quote::Fails => Err(PricingError::Unavailable("rate table offline".to_string())),
            }
        }
    }

    struct MockBookings {
        calls: Arc<Calls>,
        stored: Mutex<Vec<Booking>>,
        fail_create: bool,
    }

    impl BookingRepository for MockBookings {
        async fn create(&self, booking: &Booking) -> Result<Booking, RepositoryError> {
            self.calls.creates.fetch_add(1, Ordering::SeqCst);
            if self.fail_create {
                return Err(RepositoryError::Query("database is locked".to_string()));
            }
            self.stored.lock().unwrap().push(booking.clone());
            Ok(booking.clone())
        }

        async fn get_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
            Ok(self.stored.lock().unwrap().iter().find(|b| &b.id == id).cloned())
        }

        async fn list(&self, filter: Option<BookingFilter>) -> Result<Vec<Booking>, RepositoryError> {
            let filter = filter.unwrap_or_default();
            Ok(self
                .stored
                .lock()
                .unwrap()
                .iter()
                .filter(|b| filter.status.is_none_or(|s| b.status == s))
                .cloned()
                .collect())
        }

        async fn update(&self, booking: &Booking) -> Result<Booking, RepositoryError> {
            let mut stored = self.stored.lock().unwrap();
            match stored.iter_mut().find(|b| b.id == booking.id) {
                Some(existing) => {
                    *existing = booking.clone();
                    Ok(booking.clone())
                }
                None => Err(RepositoryError::NotFound),
            }
        }
    }

    type TestBookingService =
        BookingService<MockBookings, MockCustomers, MockServices, MockAvailability, MockPricing>;

    // --- Harness ---

    struct Harness {
        service: TestBookingService,
        calls: Arc<Calls>,
        customer: Customer,
        active: Service,
        inactive: Service,
    }

    struct Setup {
        available: bool,
        quote: Quote,
        fail_create: bool,
    }

    impl Default for Setup {
        fn default() -> Self {
            Self {
                available: true,
                quote: Quote::Fixed(Decimal::new(4250, 2)),
                fail_create: false,
            }
        }
    }

    fn make_customer() -> Customer {
        Customer {
            id: CustomerId::new(),
            name: "Casey Jordan".to_string(),
            email: "casey@example.com".to_string(),
            phone: None,
            created_at: Utc::now(),
        }
    }

    fn make_service(name: &str, is_active: bool) -> Service {
        let now = Utc::now();
        Service {
            id: ServiceId::new(),
            name: name.to_string(),
            description: format!("{name} package"),
            price: Decimal::new(3500, 2),
            duration_minutes: 45,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn harness(setup: Setup) -> Harness {
        let calls = Arc::new(Calls::default());
        let customer = make_customer();
        let active = make_service("Exterior Wash", true);
        let inactive = make_service("Ceramic Coating", false);

        let service = BookingService::new(
            MockBookings {
                calls: calls.clone(),
                stored: Mutex::new(Vec::new()),
                fail_create: setup.fail_create,
            },
            MockCustomers {
                calls: calls.clone(),
                known: vec![customer.clone()],
            },
            MockServices {
                calls: calls.clone(),
                known: vec![active.clone(), inactive.clone()],
            },
            MockAvailability {
                calls: calls.clone(),
                available: setup.available,
            },
            MockPricing {
                calls: calls.clone(),
                quote: setup.quote,
            },
        );

        Harness {
            service,
            calls,
            customer,
            active,
            inactive,
        }
    }

    fn request(customer_id: &CustomerId, service_id: &ServiceId) -> CreateBookingRequest {
        CreateBookingRequest {
            customer_id: customer_id.clone(),
            service_id: service_id.clone(),
            vehicle: VehicleInfo {
                make: "Toyota".to_string(),
                model: "RAV4".to_string(),
                year: 2022,
                color: "silver".to_string(),
                license_plate: "7XYZ123".to_string(),
                vehicle_class: VehicleClass::Suv,
            },
            location: Location::InStore {
                site: "Main Street".to_string(),
            },
            scheduled_at: Utc::now() + Duration::days(2),
            notes: Some("Please vacuum the trunk".to_string()),
        }
    }

    // --- Creation workflow ---

    #[tokio::test]
    async fn test_create_booking_happy_path() {
        let h = harness(Setup::default());
        let req = request(&h.customer.id, &h.active.id);
        let scheduled_at = req.scheduled_at;

        let confirmation = h.service.create_booking(req).await.unwrap();
        let booking = &confirmation.booking;

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.price, Decimal::new(4250, 2));
        assert_eq!(confirmation.estimated_price, Decimal::new(4250, 2));
        assert_eq!(booking.customer_id, h.customer.id);
        assert_eq!(booking.service_id, h.active.id);
        assert_eq!(booking.scheduled_at, scheduled_at);
        assert_eq!(booking.duration_minutes, 45);
        assert_eq!(booking.created_at, booking.updated_at);
        assert_eq!(booking.notes.as_deref(), Some("Please vacuum the trunk"));
        assert!(!confirmation.confirmation_code.as_str().is_empty());
        assert_ne!(confirmation.confirmation_code.as_str(), booking.id.to_string());

        assert_eq!(Calls::get(&h.calls.price_quotes), 1);
        assert_eq!(Calls::get(&h.calls.creates), 1);
    }

    #[tokio::test]
    async fn test_unknown_customer_touches_nothing_else() {
        let h = harness(Setup::default());
        let req = request(&CustomerId::new(), &h.active.id);

        let err = h.service.create_booking(req).await.unwrap_err();

        assert!(matches!(err, BookingError::CustomerNotFound));
        assert_eq!(Calls::get(&h.calls.customer_lookups), 1);
        assert_eq!(Calls::get(&h.calls.service_lookups), 0);
        assert_eq!(Calls::get(&h.calls.availability_checks), 0);
        assert_eq!(Calls::get(&h.calls.price_quotes), 0);
        assert_eq!(Calls::get(&h.calls.creates), 0);
    }

    #[tokio::test]
    async fn test_inactive_service_is_not_available() {
        let h = harness(Setup::default());
        let req = request(&h.customer.id, &h.inactive.id);

        let err = h.service.create_booking(req).await.unwrap_err();

        assert!(matches!(err, BookingError::ServiceNotAvailable));
        assert_eq!(Calls::get(&h.calls.availability_checks), 0);
        assert_eq!(Calls::get(&h.calls.price_quotes), 0);
        assert_eq!(Calls::get(&h.calls.creates), 0);
        assert!(h.service.list_bookings(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_service_is_not_available() {
        let h = harness(Setup::default());
        let req = request(&h.customer.id, &ServiceId::new());

        let err = h.service.create_booking(req).await.unwrap_err();

        assert!(matches!(err, BookingError::ServiceNotAvailable));
        assert_eq!(Calls::get(&h.calls.availability_checks), 0);
        assert_eq!(Calls::get(&h.calls.price_quotes), 0);
    }

    #[tokio::test]
    async fn test_taken_slot_skips_pricing_and_persistence() {
        let h = harness(Setup {
            available: false,
            ..Default::default()
        });
        let req = request(&h.customer.id, &h.active.id);

        let err = h.service.create_booking(req).await.unwrap_err();

        assert!(matches!(err, BookingError::SlotUnavailable));
        assert_eq!(err.to_string(), "time slot not available");
        assert_eq!(Calls::get(&h.calls.availability_checks), 1);
        assert_eq!(Calls::get(&h.calls.price_quotes), 0);
        assert_eq!(Calls::get(&h.calls.creates), 0);
        assert!(h.service.list_bookings(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_window_is_unavailable() {
        let h = harness(Setup::default());

        for start in ["+262142-12-31T23:30:00Z", "9999-12-31T23:30:00Z"] {
            let mut req = request(&h.customer.id, &h.active.id);
            req.scheduled_at = start.parse().unwrap();

            let err = h.service.create_booking(req).await.unwrap_err();
            assert!(matches!(err, BookingError::SlotUnavailable));
        }

        assert_eq!(Calls::get(&h.calls.availability_checks), 0);
        assert_eq!(Calls::get(&h.calls.price_quotes), 0);
        assert_eq!(Calls::get(&h.calls.creates), 0);
    }

    #[tokio::test]
    async fn test_price_comes_from_pricing_engine() {
        for cents in [1, 999, 4250, 12_995] {
            let quote = Decimal::new(cents, 2);
            let h = harness(Setup {
                quote: Quote::Fixed(quote),
                ..Default::default()
            });
            let confirmation = h
                .service
                .create_booking(request(&h.customer.id, &h.active.id))
                .await
                .unwrap();
            assert_eq!(confirmation.booking.price, quote);
            assert_eq!(confirmation.estimated_price, quote);
        }
    }

    #[tokio::test]
    async fn test_concurrent_bookings_get_distinct_ids_and_codes() {
        let h = harness(Setup::default());
        let mut first = request(&h.customer.id, &h.active.id);
        let mut second = request(&h.customer.id, &h.active.id);
        first.scheduled_at = Utc::now() + Duration::days(3);
        second.scheduled_at = Utc::now() + Duration::days(4);

        let (a, b) = tokio::join!(
            h.service.create_booking(first),
            h.service.create_booking(second)
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.booking.id, b.booking.id);
        assert_ne!(a.confirmation_code, b.confirmation_code);
        assert_eq!(Calls::get(&h.calls.creates), 2);
    }

    #[tokio::test]
    async fn test_pricing_failure_propagates_unchanged() {
        let h = harness(Setup {
            quote: Quote::Fails,
            ..Default::default()
        });

        let err = h
            .service
            .create_booking(request(&h.customer.id, &h.active.id))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Pricing(PricingError::Unavailable(_))));
        assert_eq!(Calls::get(&h.calls.creates), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_propagates_unchanged() {
        let h = harness(Setup {
            fail_create: true,
            ..Default::default()
        });

        let err = h
            .service
            .create_booking(request(&h.customer.id, &h.active.id))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::Repository(RepositoryError::Query(_))));
        assert_eq!(err.to_string(), "query error: database is locked");
    }

    // --- Lifecycle ---

    #[tokio::test]
    async fn test_full_lifecycle_keeps_price() {
        let h = harness(Setup::default());
        let created = h
            .service
            .create_booking(request(&h.customer.id, &h.active.id))
            .await
            .unwrap()
            .booking;

        for next in [
            BookingStatus::Confirmed,
            BookingStatus::InProgress,
            BookingStatus::Completed,
        ] {
            let updated = h.service.transition_status(&created.id, next).await.unwrap();
            assert_eq!(updated.status, next);
            assert_eq!(updated.price, created.price);
            assert!(updated.updated_at >= created.created_at);
        }

        let stored = h.service.get_booking(&created.id).await.unwrap();
        assert_eq!(stored.status, BookingStatus::Completed);
        assert_eq!(stored.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_illegal_transition_rejected() {
        let h = harness(Setup::default());
        let created = h
            .service
            .create_booking(request(&h.customer.id, &h.active.id))
            .await
            .unwrap()
            .booking;

        let err = h
            .service
            .transition_status(&created.id, BookingStatus::Completed)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidTransition {
                from: BookingStatus::Pending,
                to: BookingStatus::Completed
            }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_booking_is_terminal() {
        let h = harness(Setup::default());
        let created = h
            .service
            .create_booking(request(&h.customer.id, &h.active.id))
            .await
            .unwrap()
            .booking;

        let cancelled = h.service.cancel_booking(&created.id).await.unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let err = h.service.cancel_booking(&created.id).await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_get_unknown_booking() {
        let h = harness(Setup::default());
        let err = h.service.get_booking(&BookingId::new()).await.unwrap_err();
        assert!(matches!(err, BookingError::NotFound));
    }
}
