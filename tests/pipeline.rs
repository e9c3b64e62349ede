use calcard::card::Card;
use calcard::config::Config;
use calcard::params::ParamStore;
use calcard::raster::{
    export_png, file_name, render, CardLayout, CardStyle, FontSet, PIXEL_RATIO,
};

static CONFIG: &str = r##"
year = 2026
month = 3

[params]
card-w = 400
card-h = 320
card-margin = 10
card-bg = "#102030"
shadow-a = 0

[[ranges]]
start = 3
end = 5
color = "#ff0000"

[[ranges]]
start = 20
end = 20
color = "#00ff00"
enabled = false
"##;

fn configured_card() -> Card {
    let config = Config::parse(CONFIG).unwrap();
    let mut params = ParamStore::default();
    config.apply_params(&mut params).unwrap();
    let ranges = config.range_list().unwrap();
    Card::new(params, config.year.unwrap(), config.month.unwrap(), ranges).unwrap()
}

#[test]
fn config_to_png() {
    let card = configured_card();
    assert_eq!(card.highlights().len(), 3);
    assert!(card.highlights().get(20).is_none());

    let tmpdir = tempfile::tempdir().unwrap();
    let path = tmpdir.path().join(file_name(card.year(), card.month()));
    export_png(&card, &FontSet::none(), &path, PIXEL_RATIO).unwrap();
    assert!(path.ends_with("calendar-2026-03.png"));
    let img = image::open(&path).unwrap().into_rgba8();
    assert_eq!(img.dimensions(), (840, 680));

    let style = CardStyle::from_card(&card).unwrap().scaled_by(PIXEL_RATIO);
    let layout = CardLayout::compute(&style);
    let d = card.highlights().get(4).unwrap();
    let (cx, cy) = layout.highlight(d, &style).center();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let p = img.get_pixel(cx as u32, cy as u32);
    assert_eq!((p[0], p[1], p[2], p[3]), (0xff, 0, 0, 0xff));
    let corner = img.get_pixel(0, 0);
    assert_eq!(corner[3], 0);
}

#[test]
fn batch_preset_renders_at_card_size() {
    let card = Card::batch_preset(2026, 3).unwrap();
    let img = render(&card, &FontSet::none(), 1.0).unwrap();
    assert_eq!(img.dimensions(), (500, 400));
    // No margin and no highlights: the middle of the card is plain background
    let p = img.get_pixel(250, 200);
    assert_eq!((p[0], p[1], p[2], p[3]), (0xff, 0xff, 0xff, 0xff));
}
