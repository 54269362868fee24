use super::*;

const ALL: [Ease; 4] = [Ease::Linear, Ease::OutQuad, Ease::InOutQuad, Ease::OutCubic];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
        assert_eq!(ease.apply(-3.0), 0.0);
        assert_eq!(ease.apply(7.0), 1.0);
    }
}

#[test]
fn tween_lands_exactly_on_target() {
    for ease in ALL {
        assert_eq!(ease.tween(10.0, 30.0, 0.0), 10.0);
        assert_eq!(ease.tween(10.0, 30.0, 1.0), 30.0);
    }
    assert_eq!(Ease::Linear.tween(10.0, 30.0, 0.5), 20.0);
}

#[test]
fn out_curves_lead_linear() {
    assert!(Ease::OutQuad.apply(0.25) > Ease::Linear.apply(0.25));
    assert!(Ease::OutCubic.apply(0.25) > Ease::OutQuad.apply(0.25));
}

#[test]
fn nan_progress_snaps_to_end() {
    assert_eq!(Ease::Linear.tween(1.0, 2.0, f64::NAN), 2.0);
}
