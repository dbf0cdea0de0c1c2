use std::path::PathBuf;
use std::sync::Arc;
use jumanji_core::BookingService;

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<BookingService>,
    pub public_dir: PathBuf,
}
