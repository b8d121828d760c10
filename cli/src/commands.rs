use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use yuletide_core::{
    Action, AdventureConfig, AdventureConfigExt, CertificateFormat, MissionId, Outcome,
};

use crate::context::CliContext;
use crate::error::CommandError;
use crate::view;

/// Dispatch one action and print what it did
fn apply(ctx: &mut CliContext, action: Action) -> Outcome {
    let outcome = ctx.session.dispatch(action);
    if let Some(text) = view::outcome(&ctx.session, &outcome) {
        println!("{text}");
    }
    outcome
}

pub fn start(ctx: &mut CliContext) {
    apply(ctx, Action::Begin);
    println!("{}", view::status(&ctx.session));
}

pub fn status(ctx: &CliContext) {
    println!("{}", view::status(&ctx.session));
}

/// Open a mission. Animated missions play every frame before returning.
pub async fn play(ctx: &mut CliContext, mission: MissionId) -> Result<(), CommandError> {
    let outcome = apply(ctx, Action::Play(mission));
    let Outcome::AnimationStarted { frames, .. } = outcome.clone() else {
        return Ok(());
    };

    let delay = Duration::from_millis(ctx.config.animation.frame_delay_ms(mission));
    let mut last = outcome;
    for frame in &frames {
        print!("\r{}", view::frame_line(frame));
        // Frames overwrite each other on one line
        std::io::stdout().flush()?;
        tokio::time::sleep(delay).await;
        last = ctx.session.dispatch(Action::Tick);
    }
    println!();
    tokio::time::sleep(Duration::from_millis(ctx.config.animation.settle_ms)).await;

    tracing::debug!(%mission, frames = frames.len(), "Animation finished");
    if let Some(text) = view::outcome(&ctx.session, &last) {
        println!("{text}");
    }
    Ok(())
}

/// Pick a box, numbered from 1
pub fn guess(ctx: &mut CliContext, number: u32) -> Result<(), CommandError> {
    let index = number
        .checked_sub(1)
        .ok_or_else(|| CommandError::Usage("boxes are numbered from 1".to_string()))?;
    apply(ctx, Action::Guess(index));
    Ok(())
}

pub fn catch(ctx: &mut CliContext) {
    apply(ctx, Action::Catch);
}

/// Hang an ornament on a slot, numbered from 1
pub fn hang(ctx: &mut CliContext, slot: u32) -> Result<(), CommandError> {
    let index = slot
        .checked_sub(1)
        .ok_or_else(|| CommandError::Usage("slots are numbered from 1".to_string()))?;
    apply(ctx, Action::Hang(index));
    Ok(())
}

/// Issue the certificate and write it to the output directory
pub fn certificate(
    ctx: &mut CliContext,
    format: Option<CertificateFormat>,
    out: Option<PathBuf>,
) -> Result<PathBuf, CommandError> {
    let format = format.unwrap_or(ctx.config.certificate.format);
    let dir = out.unwrap_or_else(|| PathBuf::from(&ctx.config.certificate.output_dir));

    let certificate = ctx.issue_certificate(format)?;
    let path = dir.join(&certificate.file_name);
    write_file(&dir, &path, &certificate.bytes)?;

    tracing::info!(path = %path.display(), content_type = certificate.content_type, "Certificate saved");
    println!("🎁 Saved {} ({} bytes)", path.display(), certificate.bytes.len());
    Ok(path)
}

fn write_file(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), CommandError> {
    std::fs::create_dir_all(dir)
        .and_then(|_| std::fs::write(path, bytes))
        .map_err(|source| CommandError::Write {
            path: path.to_path_buf(),
            source,
        })
}

/// Show the settings in use, optionally writing them to the config file
pub fn config(ctx: &CliContext, save: bool) -> Result<(), CommandError> {
    let path = ctx.config_path.clone().or_else(AdventureConfig::config_path);
    if save {
        match &ctx.config_path {
            Some(path) => ctx.config.save_to(path)?,
            None => ctx.config.save()?,
        }
        tracing::info!(path = ?path, "Config saved");
    }
    println!("{}", view::settings(&ctx.config, path.as_deref()));
    Ok(())
}

pub fn reset(ctx: &mut CliContext) {
    apply(ctx, Action::Reset);
}

pub fn help() {
    println!(
        "\
Commands:
  start                         leave the title screen
  status                        show mission progress
  play <mission>                play a mission ({})
  guess <box>                   open a box in Find the Present
  catch                         catch a snowflake
  hang <slot>                   hang an ornament
  certificate [-f png|text] [-o DIR]
                                save your certificate
  config [--save]               show settings, or write them to the config file
  reset                         start over
  exit                          quit",
        MissionId::ALL.map(|m| m.as_str()).join(", ")
    );
}

pub fn exit() {
    println!("Merry Christmas! 🎄");
}

#[cfg(test)]
mod tests {
    use super::*;
    use yuletide_core::{AnimationConfig, Scene};
    use yuletide_render::CertificateError;

    fn quick_context() -> CliContext {
        let config = AdventureConfig {
            seed: Some(3),
            animation: AnimationConfig {
                frames: 2,
                star_delay_ms: 0,
                racer_delay_ms: 0,
                tree_delay_ms: 0,
                settle_ms: 0,
            },
            ..Default::default()
        };
        CliContext::new(config, None)
    }

    #[tokio::test]
    async fn play_runs_animation_to_completion() {
        let mut ctx = quick_context();
        start(&mut ctx);
        play(&mut ctx, MissionId::DeliverStar).await.unwrap();

        assert!(ctx.session.tracker().is_unlocked(MissionId::DriveRacer));
        assert_eq!(ctx.session.scene(), Scene::MissionSelect);
    }

    #[test]
    fn box_zero_is_a_usage_error() {
        let mut ctx = quick_context();
        start(&mut ctx);
        assert!(matches!(guess(&mut ctx, 0), Err(CommandError::Usage(_))));
        assert!(matches!(hang(&mut ctx, 0), Err(CommandError::Usage(_))));
    }

    #[test]
    fn certificate_before_finishing_is_refused() {
        let mut ctx = quick_context();
        start(&mut ctx);
        let dir = tempfile::tempdir().unwrap();

        let result = certificate(&mut ctx, None, Some(dir.path().to_path_buf()));
        assert!(matches!(
            result,
            Err(CommandError::Certificate(CertificateError::Incomplete { .. }))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn config_save_writes_the_given_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("adventure.toml");
        let mut ctx = quick_context();
        ctx.config.player_name = "MAYA".to_string();
        ctx.config_path = Some(path.clone());

        config(&ctx, false).unwrap();
        assert!(!path.exists());

        config(&ctx, true).unwrap();
        let saved = AdventureConfig::load_from(&path).unwrap();
        assert_eq!(saved.player_name, "MAYA");
        assert_eq!(saved.animation.frames, 2);
    }

    #[test]
    fn config_save_failure_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();
        let mut ctx = quick_context();
        ctx.config_path = Some(blocker.join("adventure.toml"));

        assert!(matches!(config(&ctx, true), Err(CommandError::Config(_))));
    }

    #[tokio::test]
    async fn finished_adventure_writes_certificate_file() {
        let mut ctx = quick_context();
        start(&mut ctx);
        for mission in [MissionId::DeliverStar, MissionId::DriveRacer, MissionId::LightTree] {
            play(&mut ctx, mission).await.unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("awards");
        let path = certificate(&mut ctx, Some(CertificateFormat::Text), Some(out.clone())).unwrap();

        assert_eq!(path, out.join("Rowan_Christmas_Certificate.txt"));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("CHRISTMAS HERO AWARD"));
    }
}
