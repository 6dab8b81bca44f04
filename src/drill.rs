//! Interactive terminal drivers
//!
//! Learn mode (listen, look, trace) and checkpoint mode (mastery quiz)
//! over stdin/stdout. All session transitions happen synchronously on
//! this thread; the only background work is result delivery.

use anyhow::Result;
use rand::thread_rng;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

use crate::checkpoint::{CheckpointSession, LevelOutcome, Phase, OPTION_COUNT};
use crate::grading::{self, Surface};
use crate::report::{self, ResultPayload};
use crate::speech::{lines, Speaker, TerminalSpeaker};
use crate::store::{self, settings, stats, student};

/// Learn mode: speak the symbol, optionally grade a traced raster.
pub fn run_learn(dir: &Path, symbol: Option<String>, trace: Option<&Path>) -> Result<()> {
    let cfg = settings::load(dir);
    let symbol = symbol.unwrap_or_else(|| cfg.enabled_symbols[0].clone());
    if !crate::catalog::contains(&symbol) {
        println!("'{}' is not a bopomofo symbol.", symbol);
        return Ok(());
    }

    let mut speaker = TerminalSpeaker::init();
    println!();
    println!("  目標符號：{}", symbol);
    println!("  提示：聽 2 次再描。");
    speaker.speak_symbol(&symbol);

    if let Some(path) = trace {
        let verdict = grade_trace_file(&symbol, path);
        println!();
        println!("  描寫結果：{} 分", verdict.score);
        if verdict.passed {
            println!("  ✅ 通過");
            speaker.speak_coach(lines::PASSED);
        } else {
            println!("  ❌ 未通過");
            speaker.speak_coach(lines::RETRY);
        }
    } else {
        println!("  (pass --trace <file.ppm> to grade a traced image)");
    }
    Ok(())
}

/// Grade one traced raster; unreadable input degrades to score 0 so a
/// broken capture never aborts the session.
pub fn grade_trace_file(symbol: &str, path: &Path) -> grading::TraceVerdict {
    match Surface::from_ppm(path) {
        Ok(trace) => grading::grade(symbol, &trace),
        Err(e) => {
            debug!(error = %e, "trace raster unobtainable");
            grading::TraceVerdict { score: 0, passed: false }
        }
    }
}

/// Checkpoint mode: the full mastery-gated quiz.
pub async fn run_checkpoint(dir: &Path) -> Result<()> {
    let mut speaker = TerminalSpeaker::init();
    let mut rng = thread_rng();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    drive_checkpoint(dir, &mut rng, &mut input, &mut speaker).await
}

async fn drive_checkpoint<R, I, S>(
    dir: &Path,
    rng: &mut R,
    input: &mut I,
    speaker: &mut S,
) -> Result<()>
where
    R: rand::Rng,
    I: BufRead,
    S: Speaker,
{
    let cfg = settings::load(dir);
    let profile = student::load(dir);

    if !profile.is_ready() {
        println!("A student id is required first: bopodrill student --id A03");
        return Ok(());
    }
    if cfg.enabled_symbols.len() < OPTION_COUNT {
        // Multiple choice needs 4 distinct symbols to draw from
        println!(
            "At least {} symbols must be enabled (currently {}).",
            OPTION_COUNT,
            cfg.enabled_symbols.len()
        );
        return Ok(());
    }

    let mut session = CheckpointSession::new();

    loop {
        let cfg = settings::load(dir);
        session.start(cfg.enabled_symbols.clone(), cfg.thresholds(), &profile.student_id)?;
        println!();
        println!(
            "闖關開始：共 {} 關，每關至少 {} 題、正確率至少 {}%",
            session.total_levels(),
            cfg.required_questions,
            cfg.required_accuracy
        );

        while session.phase() == Phase::InLevel {
            let symbol = session.current_symbol().unwrap_or_default().to_string();
            let attempts = session.progress().map(|p| p.attempts).unwrap_or(0);
            println!();
            println!(
                "── 第 {}/{} 關 │ 目標 {} │ 已做 {} 題 │ 正確率 {}% ──",
                session.level_index() + 1,
                session.total_levels(),
                symbol,
                attempts,
                session.level_accuracy()
            );
            if cfg.auto_speak_on_question {
                speaker.speak_symbol(&symbol);
            }

            let options = session.question_options(rng);
            for (i, opt) in options.iter().enumerate() {
                println!("  [{}] {}", i + 1, opt);
            }

            let chosen = loop {
                let line = match prompt(input, "選 1-4（r 再聽一次，q 離開）> ")? {
                    Some(l) => l,
                    None => return Ok(()),
                };
                match line.as_str() {
                    "q" => return Ok(()),
                    "r" => speaker.speak_symbol(&symbol),
                    n => {
                        if let Some(opt) = n
                            .parse::<usize>()
                            .ok()
                            .and_then(|i| options.get(i.wrapping_sub(1)))
                        {
                            break opt.clone();
                        }
                        println!("  先聽，再選。");
                    }
                }
            };

            let correct = session.record_answer(&chosen).unwrap_or(false);
            println!("{}", if correct { "  ✅ 答對！" } else { "  ❌ 答錯。" });
            // Hearing the right answer again reinforces it either way
            speaker.speak_symbol(&symbol);

            if cfg.lock_after_pick && !session.can_evaluate() {
                // Choice is locked; wait for an explicit advance
                if prompt(input, "下一題 →（Enter）")?.is_none() {
                    return Ok(());
                }
            }

            if session.can_evaluate() {
                // The level is settled only when the student asks for
                // the result, never as a side effect of answering.
                match prompt(input, "看本關結果（Enter 看結果，q 離開）> ")? {
                    None => return Ok(()),
                    Some(ref l) if l.as_str() == "q" => return Ok(()),
                    Some(_) => {}
                }
                let latest = settings::load(dir).thresholds();
                let mut totals = stats::load(dir);
                match session.evaluate_level(latest, &mut totals) {
                    LevelOutcome::Passed { next_symbol } => {
                        stats::save(dir, &totals)?;
                        println!();
                        println!("🎯 本關通過！下一關：{}", next_symbol);
                        speaker.speak_coach(lines::NEXT_LEVEL);
                    }
                    LevelOutcome::AllClear => {
                        stats::save(dir, &totals)?;
                        speaker.speak_coach(lines::PASSED);
                    }
                    LevelOutcome::Retry => {
                        println!();
                        println!("本關未達標，重新開始這一關。");
                        speaker.speak_coach(lines::RETRY);
                    }
                    LevelOutcome::NotReady => {}
                }
            }
        }

        // All clear: offer the one-shot result delivery
        println!();
        println!("🎉 全部通關！你已經把選定的 {} 個注音都通過了。", session.total_levels());

        let sending = match prompt(input, "回傳給老師？（Enter 回傳，s 跳過）> ")? {
            None => return Ok(()),
            Some(ref l) if l.as_str() == "s" => false,
            Some(_) => true,
        };
        if sending {
            let payload = ResultPayload::for_clearance(
                store::device_id(dir)?,
                profile.clone(),
                &cfg,
                session.levels(),
            );
            let mut rx = report::spawn_delivery(cfg.endpoint(), payload);
            println!("{}", report::DeliveryStatus::Sending);
            // The session is free to continue; for the terminal flow we
            // show the settled status before the next prompt.
            if rx.changed().await.is_ok() {
                println!("{}", *rx.borrow());
            }
        }

        match prompt(input, "再玩一次？（Enter 再來，q 離開）> ")? {
            Some(ref l) if l.as_str() != "q" => session.restart(),
            _ => return Ok(()),
        }
    }
}

fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
