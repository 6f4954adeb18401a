//! Composing finished role and reminder tokens from an [AssetBundle].
//!
//! Every layer is drawn onto a copy of the matching background at the
//! background's native size, and the result is only scaled to the requested
//! diameter at the very end. Overlays (leaves, the setup flower) are authored at
//! the background's size and are always drawn at the origin.

use crate::{
    components::AssetBundle,
    layout::{curved_text_to_image, fit_ability_text, TextStyle},
    naming::capwords,
    raster::Raster,
    role::Role,
};

/// Icon box on role tokens, as fractions of the background
const ROLE_ICON_WIDTH: f32 = 0.6;
const ROLE_ICON_HEIGHT: f32 = 0.5;
/// Icon box on reminder tokens, as a fraction of the background
const REMINDER_ICON_SCALE: f32 = 0.75;
/// How far icons sit off centre, as a fraction of the background height
const ICON_OFFSET: f32 = 0.15;

const ABILITY_FONT_SIZE: f32 = 0.055;
const ABILITY_FIRST_LINE: f32 = 0.52;
const ABILITY_STEP: f32 = 0.1;
const ABILITY_TOP: f32 = 0.09;

const ROLE_NAME_BOTTOM: f32 = 0.08;
/// Gap under reminder text, as a fraction of the icon height
const REMINDER_TEXT_BOTTOM: f32 = 0.05;

/// Scale an icon so it exactly fills one side of the box and fits inside the
/// other: first up or down to cover the box, then down to fit within it
pub fn prepare_icon(icon: &Raster, width: f32, height: f32) -> Raster {
    let mut icon = icon.clone();
    icon.cover(width, height);
    icon.fit_within(width, height);
    icon
}

/// The horizontal offset that centres something `inner` pixels wide
fn centred(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64).div_euclid(2)
}

/// Compose a role token: background, one leaf per reminder, the icon, the night
/// and setup modifiers, the ability text across the top and the role name curved
/// along the bottom. `icon` is the raw icon, it is resized here
pub fn create_role_token<B: AssetBundle + ?Sized>(
    icon: &Raster,
    role: &Role,
    bundle: &B,
    diameter: u32,
) -> Raster {
    let mut token = bundle.role_background();
    let (width, height) = token.dimensions();
    let (w, h) = (width as f32, height as f32);

    let icon = prepare_icon(icon, w * ROLE_ICON_WIDTH, h * ROLE_ICON_HEIGHT);

    for leaf in bundle.leaves().iter().take(role.reminders.len()) {
        token.composite(leaf, 0, 0);
    }

    let icon_x = centred(width, icon.width());
    let icon_y =
        (height as i64 - icon.height() as i64 + (h * ICON_OFFSET) as i64).div_euclid(2);
    token.composite(&icon, icon_x, icon_y);
    drop(icon);

    if role.first_night {
        token.composite(bundle.left_leaf(), 0, 0);
    }
    if role.other_nights {
        token.composite(bundle.right_leaf(), 0, 0);
    }
    if role.affects_setup {
        token.composite(bundle.setup_flower(), 0, 0);
    }

    let ability = fit_ability_text(
        &role.ability,
        (h * ABILITY_FONT_SIZE).trunc(),
        (w * ABILITY_FIRST_LINE).trunc(),
        (w * ABILITY_STEP).trunc(),
        bundle.ability_font(),
    );
    if !ability.is_empty() {
        token.composite(
            &ability,
            centred(width, ability.width()),
            (h * ABILITY_TOP) as i64,
        );
    }

    let name = curved_text_to_image(&role.name, TextStyle::Role, width, bundle.role_name_font());
    if !name.is_empty() {
        let name_y = height as i64 - name.height() as i64 - (h * ROLE_NAME_BOTTOM) as i64;
        token.composite(&name, centred(width, name.width()), name_y);
    }

    log::debug!("composed role token for {}", role.name);
    token.resize(diameter, diameter);
    token
}

/// Compose a reminder token around an icon that has already been sized for the
/// reminder background (see [prepare_icon]). The text is title-cased
pub fn create_reminder_token<B: AssetBundle + ?Sized>(
    icon: &Raster,
    text: &str,
    bundle: &B,
    diameter: u32,
) -> Raster {
    let mut reminder = bundle.reminder_background();
    let (width, height) = reminder.dimensions();
    let h = height as f32;

    let icon_y =
        (height as i64 - icon.height() as i64 - (h * ICON_OFFSET) as i64).div_euclid(2);
    reminder.composite(icon, centred(width, icon.width()), icon_y);

    let text = capwords(text);
    let curved = curved_text_to_image(&text, TextStyle::Reminder, width, bundle.reminder_font());
    if !curved.is_empty() {
        let text_y = height as i64
            - curved.height() as i64
            - (icon.height() as f32 * REMINDER_TEXT_BOTTOM) as i64;
        reminder.composite(&curved, centred(width, curved.width()), text_y);
    }

    reminder.resize(diameter, diameter);
    reminder
}

/// Compose one reminder token per reminder the role has, all sharing one copy of
/// the icon sized for the reminder background
pub fn create_reminder_tokens<B: AssetBundle + ?Sized>(
    role: &Role,
    icon: &Raster,
    bundle: &B,
    diameter: u32,
) -> Vec<Raster> {
    if role.reminders.is_empty() {
        return Vec::new();
    }

    let (width, height) = bundle.reminder_background().dimensions();
    let icon = prepare_icon(
        icon,
        width as f32 * REMINDER_ICON_SCALE,
        height as f32 * REMINDER_ICON_SCALE,
    );
    log::debug!("composing {} reminder(s) for {}", role.reminders.len(), role.name);
    role.reminders
        .iter()
        .map(|text| create_reminder_token(&icon, text, bundle, diameter))
        .collect()
}
