fn main() {
    env_logger::init();
    chess_bot::uci::run_uci_loop();
}
