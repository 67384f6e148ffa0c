use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["stackfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_play_flags() {
        let args = CommandArgs::try_parse_from([
            "stackfall",
            "play",
            "--seed",
            "0123456789abcdef0123456789abcdef",
            "--fps",
            "30",
            "--no-ghost",
            "--summary-json",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(
            arg.seed.map(|seed| seed.to_string()).as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
        assert_eq!(arg.fps, 30);
        assert!(arg.no_ghost);
        assert!(arg.summary_json);
    }

    #[test]
    fn test_rejects_bad_seed_and_fps() {
        assert!(CommandArgs::try_parse_from(["stackfall", "play", "--seed", "abc"]).is_err());
        assert!(CommandArgs::try_parse_from(["stackfall", "play", "--fps", "0"]).is_err());
    }
}
