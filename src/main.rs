use hubcheck::error::AppResult;

fn main() -> AppResult<()> {
    hubcheck::run()
}
