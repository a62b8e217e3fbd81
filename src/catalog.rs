/// `prompt_modifier` is injected verbatim into the edit instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HairOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt_modifier: &'static str,
    pub icon: &'static str,
}

impl HairOption {
    const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        prompt_modifier: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            description,
            prompt_modifier,
            icon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutCollection {
    Women,
    Men,
}

impl CutCollection {
    pub fn label(self) -> &'static str {
        match self {
            CutCollection::Women => "Women's cuts",
            CutCollection::Men => "Men's cuts",
        }
    }

    pub fn options(self) -> &'static [HairOption] {
        match self {
            CutCollection::Women => WOMEN_CUT_OPTIONS,
            CutCollection::Men => MEN_CUT_OPTIONS,
        }
    }
}

pub static COLOR_OPTIONS: &[HairOption] = &[
    HairOption::new(
        "blonde-platinum",
        "Platinum Blonde",
        "Cool, bright blonde.",
        "Change the hair color to icy platinum blonde.",
        "👱‍♀️",
    ),
    HairOption::new(
        "honey-blonde",
        "Honey Blonde",
        "Warm and golden.",
        "Change the hair color to warm honey blonde.",
        "🍯",
    ),
    HairOption::new(
        "brunette-chocolate",
        "Chocolate Brown",
        "Deep, rich brown.",
        "Change the hair color to deep chocolate brown.",
        "🍫",
    ),
    HairOption::new(
        "chestnut",
        "Light Chestnut",
        "Soft brown with golden glints.",
        "Change the hair color to light chestnut brown.",
        "🌰",
    ),
    HairOption::new(
        "jet-black",
        "Jet Black",
        "Dark, glossy and intense.",
        "Change the hair color to jet black.",
        "🖤",
    ),
    HairOption::new(
        "red-intense",
        "Intense Red",
        "Vibrant and bold.",
        "Change the hair color to vibrant cherry red.",
        "🍒",
    ),
    HairOption::new(
        "copper",
        "Copper / Ginger",
        "Natural, warm orange.",
        "Change the hair color to natural copper ginger.",
        "🦊",
    ),
    HairOption::new(
        "balayage",
        "Balayage",
        "Natural fade from dark roots to light ends.",
        "Apply a balayage technique with dark roots transitioning to lighter ends.",
        "🖌️",
    ),
    HairOption::new(
        "highlights",
        "Highlights",
        "Subtle brightening.",
        "Add sun-kissed highlights throughout the hair.",
        "✨",
    ),
    HairOption::new(
        "fantasy-pink",
        "Pastel Pink",
        "Soft fantasy shade.",
        "Change the hair color to soft pastel pink.",
        "🌸",
    ),
    HairOption::new(
        "electric-blue",
        "Electric Blue",
        "Eye-catching and modern.",
        "Change the hair color to vivid electric blue.",
        "⚡",
    ),
    HairOption::new(
        "silver-grey",
        "Silver Grey",
        "Sophisticated and trendy.",
        "Change the hair color to metallic silver grey.",
        "👵",
    ),
];

pub static WOMEN_CUT_OPTIONS: &[HairOption] = &[
    HairOption::new(
        "bob",
        "Classic Bob",
        "Jaw-length.",
        "Change the hairstyle to a classic chin-length Bob cut.",
        "💇‍♀️",
    ),
    HairOption::new(
        "long-bob",
        "Lob (Long Bob)",
        "Just above the shoulders.",
        "Change the hairstyle to a Long Bob (Lob) hitting just above the shoulders.",
        "📏",
    ),
    HairOption::new(
        "pixie",
        "Pixie Cut",
        "Very short and textured.",
        "Change the hairstyle to a short, textured Pixie cut.",
        "🧚",
    ),
    HairOption::new(
        "layers-long",
        "Long Layers",
        "Volume and movement.",
        "Change the hairstyle to long hair with many face-framing layers.",
        "🌬️",
    ),
    HairOption::new(
        "shag",
        "Shag Cut",
        "Relaxed, 70s rock look.",
        "Change the hairstyle to a modern Shag cut with choppy layers and bangs.",
        "🎸",
    ),
    HairOption::new(
        "bangs-straight",
        "Straight Bangs",
        "Adds full bangs.",
        "Add straight, full bangs to the forehead.",
        "⛩️",
    ),
    HairOption::new(
        "curtain-bangs",
        "Curtain Bangs",
        "Open and soft.",
        "Add soft curtain bangs that frame the face.",
        "🎭",
    ),
    HairOption::new(
        "wavy-beach",
        "Beach Waves",
        "Relaxed texture.",
        "Change the hair texture to loose, messy beach waves.",
        "🌊",
    ),
    HairOption::new(
        "sleek-straight",
        "Sleek Straight",
        "Perfectly straight and polished.",
        "Straighten the hair completely for a sleek, polished look.",
        "🥢",
    ),
];

pub static MEN_CUT_OPTIONS: &[HairOption] = &[
    HairOption::new(
        "low-fade",
        "Low Fade",
        "Classic low fade.",
        "Change the hairstyle to a classic Low Fade with textured top.",
        "💈",
    ),
    HairOption::new(
        "mid-fade-quiff",
        "Mid Fade & Quiff",
        "Mid fade with a quiff on top.",
        "Change the hairstyle to a Mid Fade with a voluminous Quiff on top.",
        "😎",
    ),
    HairOption::new(
        "buzz-cut",
        "Buzz Cut",
        "Military short.",
        "Change the hairstyle to a Buzz cut (very short uniform length).",
        "🪒",
    ),
    HairOption::new(
        "pompadour",
        "Pompadour",
        "High volume swept back.",
        "Change the hairstyle to a classic Pompadour slicked back.",
        "🕺",
    ),
    HairOption::new(
        "textured-crop",
        "Textured Crop",
        "Short and textured (French Crop).",
        "Change the hairstyle to a French Crop with textured fringe.",
        "🧢",
    ),
    HairOption::new(
        "slick-back",
        "Slick Back",
        "Elegant swept-back styling.",
        "Change the hairstyle to a classic Slick Back look.",
        "💼",
    ),
    HairOption::new(
        "mullet-modern",
        "Modern Mullet",
        "Short sides, long back.",
        "Change the hairstyle to a trendy Modern Mullet.",
        "🤘",
    ),
    HairOption::new(
        "surfer-flow",
        "Surfer Flow",
        "Medium length and wavy.",
        "Change the hairstyle to a medium-length flowy surfer style.",
        "🏄",
    ),
    HairOption::new(
        "side-part-men",
        "Classic Side Part",
        "Formal side parting.",
        "Change the hairstyle to a gentleman's classic Side Part.",
        "🤵",
    ),
];

fn find_in(options: &'static [HairOption], id: &str) -> Option<&'static HairOption> {
    let id = id.trim();
    options.iter().find(|option| option.id.eq_ignore_ascii_case(id))
}

pub fn find_cut(id: &str) -> Option<&'static HairOption> {
    find_in(WOMEN_CUT_OPTIONS, id).or_else(|| find_in(MEN_CUT_OPTIONS, id))
}

pub fn find_color(id: &str) -> Option<&'static HairOption> {
    find_in(COLOR_OPTIONS, id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn ids_are_unique_within_each_axis() {
        let cut_ids: Vec<&str> = WOMEN_CUT_OPTIONS
            .iter()
            .chain(MEN_CUT_OPTIONS.iter())
            .map(|option| option.id)
            .collect();
        let unique: HashSet<&str> = cut_ids.iter().copied().collect();
        assert_eq!(unique.len(), cut_ids.len());

        let color_ids: HashSet<&str> = COLOR_OPTIONS.iter().map(|option| option.id).collect();
        assert_eq!(color_ids.len(), COLOR_OPTIONS.len());
    }

    #[test]
    fn every_option_carries_a_prompt_modifier() {
        for option in COLOR_OPTIONS
            .iter()
            .chain(WOMEN_CUT_OPTIONS)
            .chain(MEN_CUT_OPTIONS)
        {
            assert!(!option.prompt_modifier.trim().is_empty(), "{}", option.id);
            assert!(option.prompt_modifier.ends_with('.'), "{}", option.id);
        }
    }

    #[test]
    fn finds_cuts_across_both_collections() {
        assert_eq!(find_cut("bob").map(|o| o.name), Some("Classic Bob"));
        assert_eq!(find_cut(" LOW-FADE ").map(|o| o.name), Some("Low Fade"));
        assert!(find_cut("jet-black").is_none());
        assert_eq!(find_color("jet-black").map(|o| o.name), Some("Jet Black"));
    }
}
