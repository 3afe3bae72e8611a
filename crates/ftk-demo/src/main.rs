#![forbid(unsafe_code)]

//! ftk demo binary: an order form driven by screen traversal.

mod cli;

use std::fs::File;
use std::sync::Mutex;

use ftk::core::logging::init_json_subscriber;
use ftk::prelude::*;
use ftk::{CrosstermInput, ScreenAction, TerminalGuard, TerminalRenderer, TextAttr, WidgetId};

const FORM_WIDTH: u16 = 54;
const FORM_HEIGHT: u16 = 17;

const SIZES: [&str; 3] = ["Small", "Medium", "Large"];
const TOPPINGS: [&str; 5] = ["Cheese", "Olives", "Peppers", "Onions", "Mushrooms"];
const FLAVORS: [&str; 8] = [
    "Vanilla",
    "Chocolate",
    "Strawberry",
    "Pistachio",
    "Mint",
    "Coffee",
    "Lemon",
    "Mango",
];

struct Form {
    screen: ScreenRegistry,
    name: WidgetId,
    size: WidgetId,
    toppings: WidgetId,
    flavor: WidgetId,
    ok: WidgetId,
}

fn main() {
    let opts = cli::Opts::parse();

    if let Some(path) = &opts.log_file {
        match File::create(path) {
            Ok(file) => {
                if let Err(e) = init_json_subscriber(Mutex::new(file), "debug") {
                    eprintln!("Logging disabled: {e}");
                }
            }
            Err(e) => eprintln!("Cannot open log file {}: {e}", path.display()),
        }
    }

    match run(&opts) {
        Ok(Some(summary)) => println!("{summary}"),
        Ok(None) => println!("Cancelled."),
        Err(e) => {
            eprintln!("ftk-demo: {e}");
            std::process::exit(1);
        }
    }
}

fn run(opts: &cli::Opts) -> ftk::Result<Option<String>> {
    let border = if opts.ascii {
        BorderStyle::Ascii
    } else {
        BorderStyle::Rounded
    };

    let guard = TerminalGuard::enter()?;
    let mut out = TerminalRenderer::stdout()?;
    let mut form = build_form(out.surface(), border)?;

    let ok = form.ok;
    let config = TraversalConfig::default()
        .with_key(KeyCode::F(2), ScreenAction::Reset)
        .with_intercept(move |key, screen, out| {
            if *key == KeyEvent::ctrl_char('s') {
                screen.set_focus(out, ok)
            } else {
                false
            }
        });

    let outcome = form.screen.traverse(&mut out, &mut CrosstermInput, &config);
    guard.leave()?;
    tracing::info!(?outcome, "demo finished");

    match outcome? {
        TraverseOutcome::Accepted => Ok(Some(summary(&form))),
        TraverseOutcome::Cancelled | TraverseOutcome::NoFocus => Ok(None),
    }
}

fn build_form(surface: Rect, border: BorderStyle) -> ftk::Result<Form> {
    let origin = Rect::new(
        surface.width.saturating_sub(FORM_WIDTH) / 2,
        surface.height.saturating_sub(FORM_HEIGHT) / 2,
        FORM_WIDTH,
        FORM_HEIGHT,
    );
    let at = |x: u16, y: u16, w: u16, h: u16| Rect::new(origin.x + x, origin.y + y, w, h);

    let mut screen = ScreenRegistry::new();
    let requests = screen.requests();

    let header = Label::new(
        surface,
        at(0, 0, FORM_WIDTH, 1),
        ["Order form  (F10 accept, Ctrl-X cancel, Tab next)"],
    )?
    .with_attr(TextAttr::BOLD);

    let name = Entry::new(surface, at(0, 2, FORM_WIDTH, 1), "Name: ")?.with_max_length(30);

    let size = RadioList::new(surface, at(0, 4, 18, 6), SIZES)?
        .with_title("Size")
        .with_box(true)
        .with_border(border);

    let toppings = SelectionList::new(surface, at(20, 4, 34, 7), TOPPINGS, ["no", "yes"])?
        .with_title("Toppings")
        .with_box(true)
        .with_border(border)
        .with_scrollbar(true);

    let flavor = ScrollList::new(surface, at(0, 11, 18, 6), FLAVORS)?
        .with_title("Flavor")
        .with_box(true)
        .with_border(border)
        .with_scrollbar(true);

    let mut ok = Button::new(surface, at(22, 13, 10, 3), "OK")?
        .with_box(true)
        .with_border(border);
    let on_ok = requests.clone();
    ok.bind(KeyCode::Enter, move |_button: &mut Button, _key| {
        on_ok.exit_ok();
        true
    })?;

    let mut cancel = Button::new(surface, at(36, 13, 12, 3), "Cancel")?
        .with_box(true)
        .with_border(border);
    cancel.bind(KeyCode::Enter, move |_button: &mut Button, _key| {
        requests.exit_cancel();
        true
    })?;

    let (name_id, size_id, toppings_id, flavor_id, ok_id) =
        (name.id(), size.id(), toppings.id(), flavor.id(), ok.id());

    screen.register(header);
    screen.register(name);
    screen.register(size);
    screen.register(toppings);
    screen.register(flavor);
    screen.register(ok);
    screen.register(cancel);

    Ok(Form {
        screen,
        name: name_id,
        size: size_id,
        toppings: toppings_id,
        flavor: flavor_id,
        ok: ok_id,
    })
}

fn summary(form: &Form) -> String {
    let screen = &form.screen;
    let name = screen
        .get::<Entry>(form.name)
        .map(Entry::value)
        .unwrap_or_default();
    let size = screen
        .get::<RadioList>(form.size)
        .and_then(|r| r.items().get(r.selected()).cloned())
        .unwrap_or_default();
    let toppings: Vec<&str> = screen
        .get::<SelectionList>(form.toppings)
        .map(|list| {
            list.items()
                .iter()
                .zip(list.selections())
                .filter(|(_, choice)| **choice == 1)
                .map(|(item, _)| item.as_str())
                .collect()
        })
        .unwrap_or_default();
    let flavor = screen
        .get::<ScrollList>(form.flavor)
        .and_then(|l| l.current_item().and_then(|i| l.items().get(i).cloned()))
        .unwrap_or_default();

    format!(
        "Name: {name}\nSize: {size}\nToppings: {}\nFlavor: {flavor}",
        if toppings.is_empty() {
            "none".to_string()
        } else {
            toppings.join(", ")
        }
    )
}
