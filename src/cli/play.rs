use std::error::Error;

pub fn handle_play(path: Option<&str>, headless: bool) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "tui")]
    {
        if !headless {
            return crate::player::run(path);
        }
    }

    #[cfg(not(feature = "tui"))]
    {
        if !headless {
            use owo_colors::OwoColorize;
            println!(
                "{} Built without the 'tui' feature, starting in headless mode.",
                "Note:".yellow()
            );
        }
    }

    crate::player::run_headless(path)
}
