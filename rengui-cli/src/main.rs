mod command;
mod config_gen;
mod setup;

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::Context;
use rengui_editor::controller::Field;
use rengui_editor::{Catalog, DirCatalog, EditorSession, FileStore, Persistence};
use rengui_model::Choice;

use command::{Command, HELP};

struct Args {
    config_path: String,
    script: Option<String>,
    quiet: bool,
}

fn parse_args() -> Args {
    let mut args = Args { config_path: "config.toml".into(), script: None, quiet: false };
    let mut it = env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                if let Some(path) = it.next() {
                    args.config_path = path;
                }
            }
            "--script" => args.script = it.next(),
            "--quiet" | "-q" => args.quiet = true,
            other => eprintln!("Ignoring unknown argument '{}'", other),
        }
    }
    args
}

fn main() -> anyhow::Result<()> {
    let args = parse_args();
    setup::init(&args.config_path, args.quiet);
    log::info!(">>> RenGui Editor Started <<<");

    let store = FileStore::from_config();
    log::info!("Story file: {:?}", store.path());
    let mut session = EditorSession::open(store, DirCatalog::from_config());

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open script {:?}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let interactive = args.script.is_none();

    print_cards(&session);
    prompt(interactive);
    for line in input.lines() {
        let line = line?;
        match command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(cmd)) => {
                if let Err(e) = run(&mut session, cmd) {
                    println!("error: {:#}", e);
                    log::debug!("Command '{}' failed: {:#}", line.trim(), e);
                }
            }
            Err(msg) => println!("error: {}", msg),
        }
        prompt(interactive);
    }

    if !session.controller().is_idle() {
        log::warn!("Exiting with an unresolved edit or delete; it was not applied");
    }
    log::info!("Editor closed");
    Ok(())
}

fn prompt(interactive: bool) {
    if interactive {
        print!("> ");
        let _ = io::stdout().flush();
    }
}

fn print_cards<P: Persistence, C: Catalog>(session: &EditorSession<P, C>) {
    let views = session.views();
    if views.is_empty() {
        println!("(no cards)");
    }
    for (i, view) in views.iter().enumerate() {
        println!("{:>3} {}", i, view);
    }
}

fn print_buffer<P: Persistence, C: Catalog>(session: &EditorSession<P, C>) {
    let Some(buf) = session.controller().buffer() else { return };
    println!("editing {} card {}", buf.kind(), buf.target());
    let fields = [
        Field::Actor, Field::Text, Field::Background, Field::Video, Field::CharLeft,
        Field::CharCenter, Field::CharRight, Field::Bgm, Field::Sfx, Field::Condition,
    ];
    for field in fields.into_iter().filter(|f| f.applies_to(buf.kind())) {
        println!("  {:<10} {}", field.key(), buf.get(field));
    }
    for (i, choice) in buf.choices.iter().enumerate() {
        println!("  choice {}  {} -> {}", i, choice.text, choice.next_id);
    }
}

fn run<P: Persistence, C: Catalog>(session: &mut EditorSession<P, C>, cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::List => print_cards(session),
        Command::Add(kind) => {
            session.add_and_edit(kind)?;
            print_buffer(session);
        }
        Command::Edit(index) => {
            let id = session.card_at(index).with_context(|| format!("no card at {}", index))?;
            session.open_edit(id)?;
            print_buffer(session);
        }
        Command::Set { field, value } => {
            editing(session)?.set_key(&field, value)?;
        }
        Command::AddChoice { text, next_id } => {
            editing(session)?.add_choice(Choice::new(text, next_id))?;
            print_buffer(session);
        }
        Command::RemoveChoice(index) => {
            editing(session)?.remove_choice(index)?;
            print_buffer(session);
        }
        Command::Options(field) => {
            let buf = editing(session)?;
            let fields = match field {
                Some(key) => vec![Field::parse(&key).with_context(|| format!("unknown field '{}'", key))?],
                None => vec![Field::Video, Field::Background, Field::Bgm, Field::CharLeft],
            };
            for field in fields {
                println!("{}: {}", field.key(), buf.options_for(field).join(", "));
            }
        }
        Command::Apply => println!("{}", session.confirm_edit()?),
        Command::Cancel => session.cancel_edit()?,
        Command::Delete(index) => {
            let id = session.card_at(index).with_context(|| format!("no card at {}", index))?;
            session.request_delete(id)?;
            println!("Delete card {}? (yes/no)", index);
        }
        Command::Answer(yes) => {
            if let Some(card) = session.resolve_delete(yes)? {
                println!("deleted {} card", card.kind);
            }
        }
        Command::Move { from, to } => {
            session.move_card(from, to)?;
            print_cards(session);
        }
        Command::ShowConfig => {
            let form = session.form();
            println!("title        {}", form.title);
            println!("screenWidth  {}", form.screen_width);
            println!("screenHeight {}", form.screen_height);
            println!("boxColor     {}", form.box_color);
            println!("boxOpacity   {}", form.box_opacity);
            println!("textColor    {}", form.text_color);
            println!("boxHeight    {}", form.box_height);
        }
        Command::SetConfig { key, value } => {
            if !session.form_mut().set(&key, value) {
                anyhow::bail!("unknown setting '{}'", key);
            }
        }
        Command::Save => println!("{}", session.save()?),
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }
    Ok(())
}

fn editing<P: Persistence, C: Catalog>(
    session: &mut EditorSession<P, C>,
) -> anyhow::Result<&mut rengui_editor::EditBuffer> {
    session.buffer_mut().context("no card is being edited (use 'edit <n>')")
}
