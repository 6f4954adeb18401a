use crate::{font::Font, font::Typeface, raster::Raster, TokenError};
use std::path::{Path, PathBuf};

/// Number of leaf overlays a component package provides, one per reminder
pub const LEAF_COUNT: usize = 7;

/// Every file a component package must contain. Names ending in `.*` are fonts
/// and may have any extension
pub const REQUIRED_FILES: [&str; 15] = [
    "TokenBG.png",
    "ReminderBG.png",
    "Leaf1.png",
    "Leaf2.png",
    "Leaf3.png",
    "Leaf4.png",
    "Leaf5.png",
    "Leaf6.png",
    "Leaf7.png",
    "LeafLeft.png",
    "LeafRight.png",
    "SetupFlower.png",
    "AbilityText.*",
    "ReminderText.*",
    "RoleName.*",
];

/// The artwork and fonts tokens are composed from.
///
/// Token composition only ever goes through this trait, so it never needs to know
/// where the assets came from. Backgrounds are handed out as fresh copies since
/// they become the canvas; overlays are only ever drawn from, so they are
/// borrowed.
pub trait AssetBundle {
    type Face: Typeface;

    fn role_background(&self) -> Raster;
    fn reminder_background(&self) -> Raster;
    /// Leaf overlays in order; a role with `n` reminders gets the first `n`
    fn leaves(&self) -> &[Raster];
    /// Overlay for roles that wake on the first night
    fn left_leaf(&self) -> &Raster;
    /// Overlay for roles that wake on other nights
    fn right_leaf(&self) -> &Raster;
    /// Overlay for roles that change the game setup
    fn setup_flower(&self) -> &Raster;
    fn ability_font(&self) -> &Self::Face;
    fn reminder_font(&self) -> &Self::Face;
    fn role_name_font(&self) -> &Self::Face;
}

/// A component package loaded into memory
pub struct TokenComponents<F = Font> {
    pub role_background: Raster,
    pub reminder_background: Raster,
    pub leaves: Vec<Raster>,
    pub left_leaf: Raster,
    pub right_leaf: Raster,
    pub setup_flower: Raster,
    pub ability_font: F,
    pub reminder_font: F,
    pub role_name_font: F,
    /// Directory the package was loaded from, if it came from disk
    pub source_dir: Option<PathBuf>,
}

impl TokenComponents<Font> {
    /// Load a component package from a directory. Every file in [REQUIRED_FILES]
    /// is checked for before anything is decoded, so a missing file is reported
    /// as [TokenError::MissingComponent] without doing any other work
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<TokenComponents<Font>, TokenError> {
        let dir = dir.as_ref();
        let files = verify_package(dir)?;
        let path_of = |name: &str| -> PathBuf {
            files
                .iter()
                .find(|(required, _)| *required == name)
                .map(|(_, path)| path.clone())
                .unwrap_or_else(|| dir.join(name))
        };

        log::info!("loading token components from {}", dir.display());
        let leaves = (1..=LEAF_COUNT)
            .map(|i| Raster::open(path_of(&format!("Leaf{i}.png"))))
            .collect::<Result<Vec<Raster>, TokenError>>()?;

        Ok(TokenComponents {
            role_background: Raster::open(path_of("TokenBG.png"))?,
            reminder_background: Raster::open(path_of("ReminderBG.png"))?,
            leaves,
            left_leaf: Raster::open(path_of("LeafLeft.png"))?,
            right_leaf: Raster::open(path_of("LeafRight.png"))?,
            setup_flower: Raster::open(path_of("SetupFlower.png"))?,
            ability_font: Font::open(path_of("AbilityText.*"))?,
            reminder_font: Font::open(path_of("ReminderText.*"))?,
            role_name_font: Font::open(path_of("RoleName.*"))?,
            source_dir: Some(dir.to_path_buf()),
        })
    }
}

impl<F> TokenComponents<F> {
    /// Copy every package file into `target_dir`, creating it if needed. Fails if
    /// the components were not loaded from disk or a file has since disappeared
    pub fn dump<P: AsRef<Path>>(&self, target_dir: P) -> Result<(), TokenError> {
        let Some(source_dir) = &self.source_dir else {
            return Err(TokenError::MissingComponent {
                name: "component package directory".to_string(),
            });
        };
        let target_dir = target_dir.as_ref();
        let files = verify_package(source_dir)?;

        std::fs::create_dir_all(target_dir)?;
        for (_, source) in files.iter() {
            let Some(name) = source.file_name() else {
                continue;
            };
            std::fs::copy(source, target_dir.join(name))?;
        }
        log::info!(
            "copied {} component files to {}",
            files.len(),
            target_dir.display()
        );
        Ok(())
    }
}

impl<F: Typeface> AssetBundle for TokenComponents<F> {
    type Face = F;

    fn role_background(&self) -> Raster {
        self.role_background.clone()
    }

    fn reminder_background(&self) -> Raster {
        self.reminder_background.clone()
    }

    fn leaves(&self) -> &[Raster] {
        &self.leaves
    }

    fn left_leaf(&self) -> &Raster {
        &self.left_leaf
    }

    fn right_leaf(&self) -> &Raster {
        &self.right_leaf
    }

    fn setup_flower(&self) -> &Raster {
        &self.setup_flower
    }

    fn ability_font(&self) -> &F {
        &self.ability_font
    }

    fn reminder_font(&self) -> &F {
        &self.reminder_font
    }

    fn role_name_font(&self) -> &F {
        &self.role_name_font
    }
}

/// Resolve every required file to a path inside `dir`
fn verify_package(dir: &Path) -> Result<Vec<(&'static str, PathBuf)>, TokenError> {
    REQUIRED_FILES
        .iter()
        .map(|&name| {
            find_component(dir, name)
                .map(|path| (name, path))
                .ok_or_else(|| TokenError::MissingComponent {
                    name: name.to_string(),
                })
        })
        .collect()
}

fn find_component(dir: &Path, name: &str) -> Option<PathBuf> {
    let Some(stem) = name.strip_suffix(".*") else {
        let path = dir.join(name);
        return path.is_file().then_some(path);
    };

    let mut candidates: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension().is_some()
                && path.file_stem().and_then(|s| s.to_str()) == Some(stem)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::layout::testing::BlockFace;

    fn write_package(dir: &Path, skip: Option<&str>) {
        for name in REQUIRED_FILES {
            if Some(name) == skip {
                continue;
            }
            match name.strip_suffix(".*") {
                Some(stem) => {
                    std::fs::write(dir.join(format!("{stem}.ttf")), b"not a font").expect("write")
                }
                None => Raster::filled(4, 4, colours::WHITE)
                    .save(dir.join(name))
                    .expect("save"),
            }
        }
    }

    #[test]
    fn missing_files_are_reported_by_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_package(dir.path(), Some("LeafRight.png"));
        match TokenComponents::load(dir.path()) {
            Err(TokenError::MissingComponent { name }) => assert_eq!(name, "LeafRight.png"),
            other => panic!("expected a missing component, got {:?}", other.err()),
        }
    }

    #[test]
    fn fonts_match_any_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("RoleName.otf"), b"").expect("write");
        std::fs::write(dir.path().join("RoleNameBold.ttf"), b"").expect("write");
        assert_eq!(
            find_component(dir.path(), "RoleName.*"),
            Some(dir.path().join("RoleName.otf"))
        );
        assert_eq!(find_component(dir.path(), "AbilityText.*"), None);
    }

    #[test]
    fn unparseable_fonts_fail_after_verification() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_package(dir.path(), None);
        let err = TokenComponents::load(dir.path()).err().expect("fonts are garbage");
        assert!(matches!(err, TokenError::FaceParsingError(_)), "{err:?}");
    }

    fn block_components(source_dir: Option<PathBuf>) -> TokenComponents<BlockFace> {
        TokenComponents {
            role_background: Raster::filled(8, 8, colours::WHITE),
            reminder_background: Raster::filled(8, 8, colours::BLACK),
            leaves: vec![Raster::new(8, 8); LEAF_COUNT],
            left_leaf: Raster::new(8, 8),
            right_leaf: Raster::new(8, 8),
            setup_flower: Raster::new(8, 8),
            ability_font: BlockFace,
            reminder_font: BlockFace,
            role_name_font: BlockFace,
            source_dir,
        }
    }

    #[test]
    fn dump_copies_every_file() {
        let source = tempfile::tempdir().expect("tempdir");
        write_package(source.path(), None);
        let target = tempfile::tempdir().expect("tempdir");
        let target_dir = target.path().join("nested").join("components");

        block_components(Some(source.path().to_path_buf()))
            .dump(&target_dir)
            .expect("dump");
        assert!(target_dir.join("TokenBG.png").is_file());
        assert!(target_dir.join("Leaf7.png").is_file());
        assert!(target_dir.join("ReminderText.ttf").is_file());
        let copied = std::fs::read_dir(&target_dir).expect("read").count();
        assert_eq!(copied, REQUIRED_FILES.len());
    }

    #[test]
    fn dump_needs_a_source() {
        let target = tempfile::tempdir().expect("tempdir");
        assert!(block_components(None).dump(target.path()).is_err());
    }

    #[test]
    fn backgrounds_are_copies() {
        let components = block_components(None);
        let mut background = components.role_background();
        background.composite(&Raster::filled(8, 8, colours::BLACK), 0, 0);
        assert_eq!(components.role_background.pixel(0, 0), Some(colours::WHITE));
        assert_eq!(components.leaves().len(), LEAF_COUNT);
    }
}
