fn main() {
    if let Err(e) = codeatlas_frontend::run() {
        gloo::console::error!(format!("page controller failed to start: {:#}", e));
    }
}
