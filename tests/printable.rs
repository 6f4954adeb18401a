use token_gen::*;

/// Fixed-pitch typeface drawing every glyph as a solid block
struct Blocks;

impl Typeface for Blocks {
    fn measure(&self, text: &str, size: f32) -> GlyphMetrics {
        GlyphMetrics {
            width: text.chars().count() as f32 * size * 0.6,
            height: size,
        }
    }

    fn ascent(&self, size: f32) -> f32 {
        size * 0.75
    }

    fn render_line(&self, text: &str, size: f32, colour: Colour) -> Raster {
        let m = self.measure(text, size);
        Raster::filled(m.width.ceil() as u32, m.height.ceil() as u32, colour)
    }
}

fn components() -> TokenComponents<Blocks> {
    TokenComponents {
        role_background: Raster::filled(240, 240, Colour::new_rgb(220, 210, 190)),
        reminder_background: Raster::filled(160, 160, Colour::new_rgb(60, 60, 80)),
        leaves: vec![Raster::new(240, 240); LEAF_COUNT],
        left_leaf: Raster::new(240, 240),
        right_leaf: Raster::new(240, 240),
        setup_flower: Raster::new(240, 240),
        ability_font: Blocks,
        reminder_font: Blocks,
        role_name_font: Blocks,
        source_dir: None,
    }
}

fn roles() -> Vec<Role> {
    let json = r#"[
        {
            "name": "Fortune Teller",
            "ability": "Each night, choose 2 players: you learn if either is a Demon. There is a good player that registers as a Demon to you.",
            "type": "Townsfolk",
            "first_night": true,
            "other_nights": true,
            "reminders": ["Red Herring"]
        },
        {
            "name": "Poisoner",
            "ability": "Each night, choose a player: they are poisoned tonight and tomorrow day.",
            "type": "Minion",
            "first_night": true,
            "other_nights": true,
            "reminders": ["Poisoned"]
        },
        {
            "name": "Drunk",
            "ability": "You do not know you are the Drunk. You think you are a Townsfolk character, but you are not.",
            "type": "Outsider",
            "affects_setup": true
        }
    ]"#;
    serde_json::from_str(json).expect("valid roles")
}

#[test]
fn tokens_to_printable_sheets() {
    let components = components();
    let tokens = TokenConfig {
        role_diameter: 120,
        reminder_diameter: 80,
    };
    tokens.validate().expect("valid token config");
    let printable = PrintableConfig {
        page_width: 400,
        page_height: 400,
        padding: 2,
        ..Default::default()
    };
    printable.validate().expect("valid printable config");

    let mut role_sheet = Document::new(printable.role_packer()).with_dpi(printable.dpi);
    let mut reminder_sheet = Document::new(printable.reminder_packer()).with_dpi(printable.dpi);

    let icon = Raster::filled(90, 120, Colour::new_rgb(30, 30, 30));
    for role in roles() {
        let token = create_role_token(&icon, &role, &components, tokens.role_diameter);
        assert_eq!(token.dimensions(), (120, 120));
        role_sheet.add(&token);

        for reminder in create_reminder_tokens(&role, &icon, &components, tokens.reminder_diameter) {
            assert_eq!(reminder.dimensions(), (80, 80));
            reminder_sheet.add(&reminder);
        }
    }
    assert_eq!(role_sheet.packer().diameter(), Some(120));
    assert_eq!(reminder_sheet.packer().placements().len(), 2);

    let dir = tempfile::tempdir().expect("tempdir");
    let roles_path = dir.path().join(format_filename("Trouble Brewing: roles.pdf"));
    let reminders_path = dir.path().join("reminders.pdf");

    let mut info = Info::new();
    info.title("Trouble Brewing").author("Storyteller");
    role_sheet.set_info(info);

    assert_eq!(role_sheet.write(&roles_path).expect("write roles"), 1);
    assert_eq!(reminder_sheet.write(&reminders_path).expect("write reminders"), 1);

    assert!(roles_path.ends_with("Trouble_Brewing-_roles.pdf"));
    let bytes = std::fs::read(&roles_path).expect("read back");
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(reminders_path.is_file());
}

#[test]
fn an_empty_sheet_writes_no_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nothing.pdf");
    let sheet = Document::new(PrintableConfig::default().role_packer());
    assert_eq!(sheet.write(&path).expect("write"), 0);
    assert!(!path.exists());
}

#[test]
fn many_tokens_spill_onto_more_pages() {
    let mut packer = PagePacker::new(256, 256, 0, None);
    let token = Raster::filled(128, 128, colours::INK);
    for _ in 0..9 {
        packer.add(&token);
    }
    let pages = packer.finish();
    assert_eq!(pages.len(), 3);
    assert!(pages.iter().all(|page| page.dimensions() == (256, 256)));
}

#[test]
fn loading_an_incomplete_package_fails_early() {
    let dir = tempfile::tempdir().expect("tempdir");
    Raster::filled(8, 8, colours::WHITE)
        .save(dir.path().join("TokenBG.png"))
        .expect("save");
    match TokenComponents::load(dir.path()) {
        Err(TokenError::MissingComponent { name }) => assert_eq!(name, "ReminderBG.png"),
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("an incomplete package loaded"),
    }
}
