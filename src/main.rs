use anyhow::Result;
use itertools::Itertools;

use revision_quiz::bank::{Question, QuestionBank, QuestionKind};
use revision_quiz::paths;
use revision_quiz::performance::PerformanceLog;
use revision_quiz::session::{QuizSession, SessionError};

mod cli;

use cli::MenuChoice;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let bank = QuestionBank::open(&paths::questions_dir());
    let performance = PerformanceLog::new(paths::performance_file()?);

    println!("=== Revision Quiz ===");
    let user = match cli::prompt("Enter your name: ")? {
        Some(name) if !name.is_empty() => name,
        Some(_) => "student".to_owned(),
        None => {
            println!("Goodbye!");
            return Ok(());
        }
    };

    loop {
        match cli::choose("Main Menu:", &["Start Quiz", "View Performance"], false)? {
            MenuChoice::Option(0) => run_quiz(&bank, &performance, &user)?,
            MenuChoice::Option(_) => view_performance(&performance),
            MenuChoice::Back | MenuChoice::Exit => {
                println!("Goodbye!");
                return Ok(());
            }
        }
    }
}

fn run_quiz(bank: &QuestionBank, performance: &PerformanceLog, user: &str) -> Result<()> {
    let topics = bank.topics();
    if topics.is_empty() {
        println!("\nNo questions available.");
        return Ok(());
    }

    let topic = match cli::choose("Choose a topic:", &topics, true)? {
        MenuChoice::Option(i) => topics[i].to_owned(),
        MenuChoice::Back => return Ok(()),
        MenuChoice::Exit => {
            println!("Goodbye!");
            std::process::exit(0);
        }
    };

    let available = bank.questions(&topic).len();
    let count = loop {
        let input = match cli::prompt(&format!("How many questions? [{}]: ", available))? {
            Some(input) => input,
            None => return Ok(()),
        };
        if input.is_empty() {
            break available;
        }
        match input.parse::<usize>() {
            Ok(count) if count > 0 => break count,
            _ => println!("Please enter a positive number."),
        }
    };

    let mut session = match QuizSession::start(bank, &topic, count) {
        Ok(session) => session,
        Err(SessionError::NoQuestions(_)) => {
            println!("\nNo questions available for {}.", cli::display_name(&topic));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("\nStarting quiz: {}\n", cli::display_name(&topic));

    loop {
        let text = match session.current_question() {
            Some(question) => render_question(question, session.progress()),
            None => break,
        };
        let answer = match cli::prompt(&text)? {
            Some(answer) => answer,
            None => {
                println!("\nQuiz abandoned.");
                return Ok(());
            }
        };
        let outcome = session.submit_answer(&answer)?;
        if outcome.correct {
            println!("✅ Correct!");
        } else {
            println!("❌ Incorrect. Correct answer: {}", outcome.correct_answer);
        }
        if let Some(explanation) = outcome.explanation {
            println!("   {}", explanation);
        }
        println!();
    }

    let score = session.score() as u32;
    let total = session.len() as u32;
    println!("--- Session Summary ---");
    println!(
        "{}: {}/{} correct ({:.1}%)",
        cli::display_name(&topic),
        score,
        total,
        percentage(score, total)
    );

    performance.record(user, &topic, score, total)?;

    let recent: Vec<_> = performance.history(user, &topic).take(5).collect();
    if recent.len() > 1 {
        println!("\nRecent attempts:");
        for record in recent {
            println!(
                "  {}  {}/{} ({:.1}%)",
                record.timestamp.format("%Y-%m-%d %H:%M"),
                record.score,
                record.total,
                record.accuracy() * 100.0
            );
        }
    }

    Ok(())
}

fn render_question(question: &Question, progress: (usize, usize)) -> String {
    let mut text = format!(
        "Question {} of {}: {}\n",
        progress.0 + 1,
        progress.1,
        question.prompt
    );
    if let QuestionKind::MultipleChoice { choices, .. } = &question.kind {
        for (i, choice) in choices.iter().enumerate() {
            text.push_str(&format!("  {}. {}\n", (b'a' + i as u8) as char, choice));
        }
    }
    text.push_str("Your answer: ");
    text
}

fn view_performance(performance: &PerformanceLog) {
    let grouped = performance
        .all()
        .map(|record| ((record.user.clone(), record.topic.clone()), record))
        .into_group_map();
    if grouped.is_empty() {
        println!("\nNo performance data found.");
        return;
    }

    println!("\nAll Recorded Performance:");
    println!("------------------------");
    for ((user, topic), records) in grouped.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)) {
        let (score, total) = records
            .iter()
            .fold((0, 0), |acc, r| (acc.0 + r.score, acc.1 + r.total));
        println!(
            "{} / {}: {:.1}% correct ({}/{}) over {} attempt(s)",
            user,
            cli::display_name(&topic),
            percentage(score, total),
            score,
            total,
            records.len()
        );
    }
}

fn percentage(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * f64::from(score) / f64::from(total)
}
