fn main() {
    if let Err(err) = hotel_bookings::run() {
        eprintln!("error: {err:#}");
        std::process::exit(hotel_bookings::error::exit_code_for(&err));
    }
}
