//! End-to-end tests: CSV -> dataset -> selection -> three chart payloads.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use refugee_flows::schema::{category, record};
use refugee_flows::{
    aggregate, encode, filter, pull_out, routes, Category, ChartConfig, Dashboard, Dataset,
    FilterScope, FlowError, FlowLink, Route, Selection,
};

/// Path to the test fixture directory.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample_dashboard() -> Dashboard {
    Dashboard::load(&fixture_path("refugees_sample.csv"), ChartConfig::default())
        .expect("fixture should load")
}

fn link(source: usize, target: usize, value: f64) -> FlowLink {
    FlowLink {
        source,
        target,
        value,
    }
}

fn route(from: &str, to: &str) -> Route {
    Route {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// The two-row Syria dataset: Turkey 1000 and Germany 500 in 2015.
fn syria_dataset() -> Dataset {
    let values = [Some(1000.0), Some(500.0)];
    let mut columns = vec![
        Column::new(record::ORIGIN.into(), ["Syria", "Syria"]),
        Column::new(record::RESIDENCE.into(), ["Turkey", "Germany"]),
        Column::new(record::YEAR.into(), [2015i64, 2015]),
    ];
    for name in category::ALL {
        columns.push(Column::new(name.into(), values));
    }
    Dataset::from_frame(DataFrame::new(columns).unwrap()).unwrap()
}

#[test]
fn syria_scenario() {
    let dataset = syria_dataset();
    let config = ChartConfig::default();
    let sel = Selection::new("Syria", 2015, Category::Refugees);

    let sankey_rows = filter(&dataset, &sel, FilterScope::Sankey).unwrap();
    let diagram = encode(&sankey_rows, sel.category(), &config).unwrap();
    assert_eq!(diagram.nodes, vec!["Turkey", "Germany", "Syria"]);
    assert_eq!(diagram.links, vec![link(2, 0, 1000.0), link(2, 1, 500.0)]);

    let map_rows = filter(&dataset, &sel, FilterScope::Map).unwrap();
    assert_eq!(
        routes(&map_rows, sel.origin()).unwrap(),
        vec![route("Syria", "Turkey"), route("Syria", "Germany")]
    );

    let pie_rows = filter(&dataset, &sel, FilterScope::Pie).unwrap();
    let shares = aggregate(&pie_rows, sel.category()).unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares["Syria"], 1500.0);
    assert_eq!(pull_out(&shares, "Syria", config.pull_offset).unwrap(), vec![0.3]);
}

#[test]
fn fixture_controls() {
    let controls = sample_dashboard().controls();
    assert_eq!(controls.origins, vec!["Afghanistan", "Iraq", "Syria"]);
    assert_eq!(controls.years, vec![2015, 2014]);
    assert_eq!(controls.categories, Category::ALL.to_vec());
}

#[test]
fn fixture_refugees_2015() {
    let dash = sample_dashboard();
    let sel = dash.select("Syria", 2015, "Refugees*").unwrap();
    let view = dash.render(&sel);

    let pie = view.pie.unwrap();
    assert_eq!(pie.labels, vec!["Afghanistan", "Iraq", "Syria"]);
    assert_eq!(pie.values, vec![2550.0, 200.0, 1500.0]);
    assert_eq!(pie.pull, vec![0.0, 0.0, 0.3]);

    // Lebanon has a zero count: on the sankey, not on the map
    let map = view.map.unwrap();
    assert_eq!(
        map.routes,
        vec![route("Syria", "Turkey"), route("Syria", "Germany")]
    );

    let sankey = view.sankey.unwrap();
    assert_eq!(sankey.nodes, vec!["Turkey", "Germany", "Lebanon", "Syria"]);
    assert_eq!(
        sankey.links,
        vec![link(3, 0, 1000.0), link(3, 1, 500.0), link(3, 2, 0.0)]
    );
    assert_eq!(sankey.height, 820);
}

#[test]
fn fixture_assisted_skips_null_cells() {
    let dash = sample_dashboard();
    let sel = dash
        .select("Syria", 2015, "Refugees assisted by UNHCR")
        .unwrap();
    let view = dash.render(&sel);

    let pie = view.pie.unwrap();
    assert_eq!(pie.values, vec![2450.0, 150.0, 900.0]);

    let map = view.map.unwrap();
    assert_eq!(map.routes, vec![route("Syria", "Turkey")]);

    let sankey = view.sankey.unwrap();
    assert_eq!(sankey.nodes, vec!["Turkey", "Lebanon", "Syria"]);
    assert_eq!(sankey.links.len(), 2);
}

#[test]
fn origin_without_rows_fails_only_the_pie() {
    let dash = sample_dashboard();
    let sel = dash.select("Iraq", 2014, "refugees_assisted").unwrap();
    let view = dash.render(&sel);

    assert!(matches!(&view.pie, Err(FlowError::CountryNotInResult(c)) if c == "Iraq"));
    assert!(view.map.as_ref().unwrap().is_empty());
    assert!(view.sankey.as_ref().unwrap().is_empty());

    let figures = dash.figures(&view);
    for fig in [&figures.pie, &figures.map, &figures.sankey] {
        assert!(fig["data"].as_array().unwrap().is_empty());
        assert_eq!(
            fig["layout"]["annotations"][0]["text"],
            "No data for this selection"
        );
    }
}

#[test]
fn year_without_rows_is_empty_everywhere() {
    let dash = sample_dashboard();
    let sel = Selection::new("Syria", 1999, Category::Refugees);
    let view = dash.render(&sel);

    let pie = view.pie.unwrap();
    assert!(pie.is_empty());
    assert!(pie.pull.is_empty());
    assert!(view.map.unwrap().routes.is_empty());
    let sankey = view.sankey.unwrap();
    assert!(sankey.nodes.is_empty());
    assert!(sankey.links.is_empty());
}

#[test]
fn validated_selection_rejects_unknown_values() {
    let dash = sample_dashboard();
    assert!(matches!(
        dash.select("Syria", 1999, "Refugees*"),
        Err(FlowError::UnknownYear(1999))
    ));
    assert!(matches!(
        dash.select("Narnia", 2015, "Refugees*"),
        Err(FlowError::UnknownOrigin(_))
    ));
    assert!(matches!(
        dash.select("Syria", 2015, "Tourists"),
        Err(FlowError::UnknownCategory(_))
    ));
}

#[test]
fn figures_serialize_to_json() {
    let dash = sample_dashboard();
    let sel = dash.select("Afghanistan", 2015, "refugees").unwrap();
    let figures = dash.figures(&dash.render(&sel));

    let json = serde_json::to_string(&figures).unwrap();
    let back: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(back["sankey"]["data"][0]["type"], "sankey");
    assert_eq!(
        back["sankey"]["layout"]["title"],
        "Refugees*<br>Country of Origin: Afghanistan (2015)"
    );
    assert_eq!(back["map"]["data"].as_array().unwrap().len(), 3);
    assert_eq!(back["pie"]["data"][0]["pull"], serde_json::json!([0.3, 0.0, 0.0]));
}

#[test]
fn missing_file_fails_to_load() {
    assert!(matches!(
        Dataset::load(&fixture_path("does_not_exist.csv")),
        Err(FlowError::Io(_))
    ));
}
