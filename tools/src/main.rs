//! warning-runner: headless driver for the HUD warning scheduler.
//!
//! Usage:
//!   warning-runner --seed 12345 --ticks 36000
//!   warning-runner --seed 12345 --config warnings.json --dedicated
//!   warning-runner --ipc-mode

mod rng;
mod scenario;

use anyhow::Result;
use hud_warnings::{
    audio::RecordingAudio,
    config::WarningsConfig,
    cue::SoundCue,
    event::HudEvent,
    notification::HudNotifications,
    scheduler::{HostFrame, WarningScheduler},
    status::PlayerStatus,
    types::{Millis, Tick},
};
use scenario::SimulatedPlayer;
use std::collections::BTreeMap;
use std::env;
use std::io::{self, BufRead, Write};

/// How long a voice cue plays in the recording backend.
const CUE_LENGTH_MS: Millis = 2500;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    SetStatus { status: PlayerStatus },
    Quit,
}

#[derive(serde::Serialize)]
struct RunnerState<'a> {
    frame:         Tick,
    now_ms:        Millis,
    playing:       Option<SoundCue>,
    pending_cues:  Vec<SoundCue>,
    notifications: Vec<&'static str>,
    events:        &'a [HudEvent],
}

/// Host-side state: the surfaces the scheduler talks to.
struct Host {
    scheduler: WarningScheduler,
    audio:     RecordingAudio,
    hud:       HudNotifications,
    dedicated: bool,
}

impl Host {
    fn update(&mut self, status: &PlayerStatus) -> Vec<HudEvent> {
        let step = self.scheduler.config().step_ms;
        self.audio.advance(step);
        self.hud.advance(step);
        self.scheduler.on_update(HostFrame {
            status,
            game_ready:    true,
            dedicated:     self.dedicated,
            audio:         &mut self.audio,
            notifications: &mut self.hud,
        })
    }

    fn state<'a>(&self, events: &'a [HudEvent]) -> RunnerState<'a> {
        RunnerState {
            frame:         self.scheduler.clock().current_frame,
            now_ms:        self.scheduler.clock().now_ms(),
            playing:       self.audio.playing_cue(),
            pending_cues:  self.scheduler.sounds().pending().collect(),
            notifications: self
                .hud
                .visible()
                .iter()
                .map(|v| v.notification.text.default_text())
                .collect(),
            events,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let ticks = parse_arg(&args, "--ticks", 36_000u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let dedicated = args.iter().any(|a| a == "--dedicated");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => WarningsConfig::load(&w[1])?,
        None => WarningsConfig::default(),
    };

    let mut host = Host {
        scheduler: WarningScheduler::build(&config)?,
        audio: RecordingAudio::new(CUE_LENGTH_MS),
        hud: HudNotifications::new(),
        dedicated,
    };

    if ipc_mode {
        run_ipc_loop(&mut host)?;
    } else {
        run_batch(&mut host, seed, ticks)?;
    }

    host.scheduler.teardown(&mut host.audio);
    Ok(())
}

fn run_batch(host: &mut Host, seed: u64, ticks: u64) -> Result<()> {
    let started_at = chrono::Utc::now();
    println!("HUD warnings: warning-runner");
    println!("  started:   {}", started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  seed:      {seed}");
    println!("  ticks:     {ticks}");
    println!("  dedicated: {}", host.dedicated);
    println!();

    let mut player = SimulatedPlayer::new(seed);
    let mut counts: BTreeMap<&'static str, u64> = BTreeMap::new();

    for _ in 0..ticks {
        player.step();
        for event in host.update(&player.status) {
            *counts.entry(event.event_type()).or_default() += 1;
            println!("{}", serde_json::to_string(&event)?);
        }
    }

    let elapsed = chrono::Utc::now() - started_at;
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  game time:    {:.1}s", host.scheduler.clock().now_ms() as f64 / 1000.0);
    println!("  wall time:    {}ms", elapsed.num_milliseconds());
    println!("  cues played:  {}", host.audio.played().len());
    println!("  cues stopped: {}", host.audio.stopped().len());
    println!("  still queued: {}", host.scheduler.sounds().pending_len());
    for (event_type, count) in &counts {
        println!("  {event_type:<18} {count}");
    }

    let mut per_cue: BTreeMap<&'static str, u64> = BTreeMap::new();
    for cue in host.audio.played() {
        *per_cue.entry(cue.asset_name()).or_default() += 1;
    }
    println!();
    println!("=== CUES PLAYED ===");
    for (asset, count) in &per_cue {
        println!("  {asset:<26} {count}");
    }
    Ok(())
}

fn run_ipc_loop(host: &mut Host) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut status = PlayerStatus::default();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("ignoring malformed command: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Tick { count } => {
                let events: Vec<HudEvent> =
                    (0..count).flat_map(|_| host.update(&status)).collect();
                writeln!(stdout, "{}", serde_json::to_string(&host.state(&events))?)?;
            }
            IpcCommand::SetStatus { status: next } => {
                status = next;
                writeln!(stdout, "{}", serde_json::to_string(&host.state(&[]))?)?;
            }
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&host.state(&[]))?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
