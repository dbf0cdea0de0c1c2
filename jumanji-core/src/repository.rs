use async_trait::async_trait;
use crate::booking::{Booking, NewBooking};
use crate::BoxError;

/// Repository trait for booking persistence
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a new booking; the store assigns id and timestamps.
    async fn create(&self, booking: &NewBooking) -> Result<Booking, BoxError>;
}
