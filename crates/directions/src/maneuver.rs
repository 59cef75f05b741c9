/// Icon shown next to a turn-by-turn instruction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ManeuverIcon {
    ArrowUp,
    Pin,
    TurnLeft,
    TurnSlightLeft,
    TurnSharpLeft,
    TurnRight,
    TurnSlightRight,
    TurnSharpRight,
    ForkUpLeft,
    ForkUpRight,
    EndOfRoadLeft,
    EndOfRoadRight,
    ArrowForward,
}

/// Maps a maneuver to its icon.
///
/// Pure function of `(maneuver, modifier)`; any unmatched combination falls
/// through to the forward arrow.
pub fn icon_for(maneuver: &str, modifier: Option<&str>) -> ManeuverIcon {
    match (maneuver, modifier) {
        ("depart", _) => ManeuverIcon::ArrowUp,
        ("arrive", _) => ManeuverIcon::Pin,
        ("continue", _) | ("new name", _) => ManeuverIcon::ArrowUp,
        ("turn", Some("left")) => ManeuverIcon::TurnLeft,
        ("turn", Some("slight left")) => ManeuverIcon::TurnSlightLeft,
        ("turn", Some("sharp left")) => ManeuverIcon::TurnSharpLeft,
        ("turn", Some("right")) => ManeuverIcon::TurnRight,
        ("turn", Some("slight right")) => ManeuverIcon::TurnSlightRight,
        ("turn", Some("sharp right")) => ManeuverIcon::TurnSharpRight,
        ("fork", Some("left")) => ManeuverIcon::ForkUpLeft,
        ("fork", Some("right")) => ManeuverIcon::ForkUpRight,
        ("end of road", Some("left")) => ManeuverIcon::EndOfRoadLeft,
        ("end of road", Some("right")) => ManeuverIcon::EndOfRoadRight,
        _ => ManeuverIcon::ArrowForward,
    }
}
