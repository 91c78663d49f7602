//! End-to-end composition tests

mod common;

use common::{seeded_figure, COS, HEATMAP, SCATTER, SIN, TAN};
use implore_figure::panels::trig;
use implore_figure::{
    Artist, Aspect, Axes, FigureError, LegendLocation, MarkerFill, Rect, ScatterArtist,
};

fn mapped_scatters(axes: &Axes) -> Vec<&ScatterArtist> {
    axes.scatters().filter(|s| s.values.is_some()).collect()
}

// === Layout ===

#[test]
fn test_five_panels_arranged_two_then_three() {
    let figure = seeded_figure(0);
    assert_eq!(figure.panel_count(), 5);
    assert_eq!(figure.colorbar_count(), 2);

    let top = &figure.axes[HEATMAP..=SCATTER];
    let bottom = &figure.axes[SIN..=TAN];
    let top_floor = top.iter().map(|a| a.rect.bottom).fold(f64::INFINITY, f64::min);
    for ax in bottom {
        assert!(ax.rect.top() < top_floor);
    }

    // bottom cells share one row
    for ax in &bottom[1..] {
        assert!((ax.rect.bottom - bottom[0].rect.bottom).abs() < 1e-12);
        assert!((ax.rect.height - bottom[0].rect.height).abs() < 1e-12);
    }
}

#[test]
fn test_panels_stay_inside_subplot_region() {
    let figure = seeded_figure(0);
    let region = Rect::subplot_region();
    for ax in &figure.axes {
        let r = ax.plot_rect();
        assert!(r.left >= region.left - 1e-12);
        assert!(r.right() <= region.right() + 1e-12);
        assert!(r.bottom >= region.bottom - 1e-12);
        assert!(r.top() <= region.top() + 1e-12);
    }
}

#[test]
fn test_colorbars_on_heatmap_and_scatter_only() {
    let figure = seeded_figure(0);
    for (i, ax) in figure.axes.iter().enumerate() {
        assert_eq!(ax.colorbar.is_some(), i == HEATMAP || i == SCATTER);
    }
    for ax in &figure.axes[HEATMAP..=SCATTER] {
        let cb = ax.colorbar.as_ref().unwrap();
        assert_eq!(cb.label, "color label");
        assert_eq!(cb.label_rotation, 270.0);
        assert!(!cb.outline_visible);
    }
}

// === Heatmap ===

#[test]
fn test_heatmap_fixed_scale_and_equal_aspect() {
    let figure = seeded_figure(0);
    let ax = &figure.axes[HEATMAP];
    assert_eq!(ax.aspect, Aspect::Equal);
    let Some(Artist::Image(image)) = ax.artist(0) else {
        panic!("heatmap should start with an image");
    };
    assert_eq!((image.scale.vmin, image.scale.vmax), (0.0, 1.0));
    assert_eq!(image.extent, [-3.0, 3.0, -3.0, 3.0]);
    assert_eq!(ax.view_limits(), ((-3.0, 3.0), (-3.0, 3.0)));
}

// === Scatter ===

#[test]
fn test_seed_zero_is_bit_identical() {
    let a = seeded_figure(0);
    let b = seeded_figure(0);
    let sa = mapped_scatters(&a.axes[SCATTER]);
    let sb = mapped_scatters(&b.axes[SCATTER]);
    assert_eq!(sa.len(), 2);
    for (x, y) in sa.iter().zip(&sb) {
        let bits = |v: &[f64]| v.iter().map(|f| f.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&x.y), bits(&y.y));
        assert_eq!(bits(x.values.as_ref().unwrap()), bits(y.values.as_ref().unwrap()));
    }
}

#[test]
fn test_different_seeds_differ() {
    let a = seeded_figure(0);
    let b = seeded_figure(1);
    assert_ne!(
        mapped_scatters(&a.axes[SCATTER])[0].y,
        mapped_scatters(&b.axes[SCATTER])[0].y
    );
}

#[test]
fn test_scatter_groups_share_union_scale() {
    let figure = seeded_figure(42);
    let groups = mapped_scatters(&figure.axes[SCATTER]);
    let scale = groups[0].scale.unwrap();
    assert_eq!(groups[1].scale, Some(scale));

    let union: Vec<f64> = groups
        .iter()
        .flat_map(|g| g.values.as_ref().unwrap().iter().copied())
        .collect();
    assert_eq!(scale.vmin, union.iter().copied().fold(f64::INFINITY, f64::min));
    assert_eq!(scale.vmax, union.iter().copied().fold(f64::NEG_INFINITY, f64::max));

    let cb = figure.axes[SCATTER].colorbar.as_ref().unwrap();
    assert_eq!(cb.scale, scale);
}

#[test]
fn test_scatter_legend_and_markers() {
    let figure = seeded_figure(0);
    let ax = &figure.axes[SCATTER];
    let legend = ax.legend.as_ref().unwrap();
    assert_eq!(legend.labels(), vec!["group 1", "group 2"]);
    assert_eq!(legend.location, LegendLocation::UpperLeft);

    let groups = mapped_scatters(ax);
    assert_eq!(groups[0].fill, MarkerFill::Filled);
    assert_eq!(groups[1].fill, MarkerFill::Hollow);
    assert!(groups.iter().all(|g| g.line_width == 0.75));
    assert_eq!(ax.view_limits().0, (-5.0, 105.0));
}

// === Trig ===

#[test]
fn test_only_cosine_has_legend() {
    let figure = seeded_figure(0);
    assert!(figure.axes[SIN].legend.is_none());
    assert!(figure.axes[TAN].legend.is_none());

    let legend = figure.axes[COS].legend.as_ref().unwrap();
    assert_eq!(legend.labels(), vec!["0", "π/3", "2π/3"]);
    assert_eq!(legend.title.as_deref(), Some("phase shift"));
    assert_eq!(legend.columns, 3);
    assert_eq!(legend.location, LegendLocation::Anchored { x: -0.28, y: 1.1 });
}

#[test]
fn test_trig_labels_and_limits() {
    let figure = seeded_figure(0);
    for (idx, name) in [(SIN, "sin"), (COS, "cos"), (TAN, "tan")] {
        let ax = &figure.axes[idx];
        assert_eq!(ax.y.label.as_deref(), Some(name));
        assert_eq!(ax.x.label.as_deref(), Some("angle (rads.)"));
        assert_eq!(ax.view_limits().1, (-1.05, 1.05));
        assert_eq!(ax.lines().count(), 3);
    }
}

#[test]
fn test_unknown_selector_is_error_without_curves() {
    let mut axes = Axes::new(0, Rect::unit(), (5.3, 4.0));
    let err = trig::draw_named(&mut axes, "cot").unwrap_err();
    assert!(matches!(err, FigureError::UnknownTrigFunction(_)));
    assert_eq!(axes.lines().count(), 0);
}

// === Summary ===

#[test]
fn test_summary_json() {
    let figure = seeded_figure(0);
    let summary = figure.summary();
    assert_eq!(summary.panel_count, 5);
    assert_eq!(summary.colorbar_count, 2);
    assert_eq!(summary.panels[COS].legend.as_ref().unwrap().len(), 3);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["panels"][HEATMAP]["colorbar"], "color label");
    assert_eq!(json["panels"][SIN]["y_label"], "sin");
}
