use graft_core::{Colors, ElementTypes, RuleIndex};
use rowan::SyntaxKind;

use crate::bridge::ParseDriver;
use crate::testing::{PAIR, RecordingBuilder, XYZ, XyzGrammar};
use crate::trace::{PrintTracer, Verbosity};

fn trace(entry: RuleIndex, src: &str, verbosity: Verbosity) -> String {
    let tracer = PrintTracer::new(XYZ.clone(), verbosity, Colors::OFF);
    let mut driver = ParseDriver::new(XyzGrammar).with_tracer(tracer);
    driver
        .project(
            entry,
            SyntaxKind(ElementTypes::FILE),
            RecordingBuilder::new(src),
        )
        .unwrap();
    driver.tracer().lines().join("\n")
}

#[test]
fn default_shows_rules_and_errors() {
    insta::assert_snapshot!(trace(PAIR, "x", Verbosity::Default), @r"
    parse pair
    recognized with 1 syntax error
    pair
      error 'y': <missing 'y'>
    ");
}

#[test]
fn verbose_shows_advances() {
    insta::assert_snapshot!(trace(PAIR, "xy", Verbosity::Verbose), @r"
    parse pair
    recognized with 0 syntax errors
    pair
      advance 'x'
      advance 'y'
    done pair
    ");
}

#[test]
fn very_verbose_shows_text_and_offsets() {
    insta::assert_snapshot!(trace(PAIR, "xy", Verbosity::VeryVerbose), @r#"
    parse pair
    recognized with 0 syntax errors
    pair
      advance 'x' "x" @0
      advance 'y' "y" @1
    done pair
    "#);
}

#[test]
fn failed_rule() {
    insta::assert_snapshot!(trace(PAIR, "zz", Verbosity::Default), @r"
    parse pair
    recognized with 1 syntax error
    pair
      error 'z': mismatched input 'z' expecting 'x'
    error pair: mismatched input 'z' expecting 'x'
    ");
}

#[test]
fn skipped_tokens_and_drain() {
    insta::assert_snapshot!(trace(PAIR, "zz", Verbosity::Verbose), @r"
    parse pair
    recognized with 1 syntax error
    pair
      error 'z': mismatched input 'z' expecting 'x'
      skip 'z'
    error pair: mismatched input 'z' expecting 'x'
    ");
    insta::assert_snapshot!(trace(PAIR, "xyz", Verbosity::Default), @r"
    parse pair
    recognized with 0 syntax errors
    pair
    drain 1
    ");
}
