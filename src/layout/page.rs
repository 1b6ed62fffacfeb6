//! Page layout computation.

use taffy::{
    AlignItems, AvailableSpace, Dimension, FlexDirection, JustifyContent, LengthPercentage,
    NodeId, Size, Style, TaffyTree,
};
use unicode_width::UnicodeWidthStr;

use crate::engine::TriggerRect;
use crate::error::LayoutError;
use crate::primitives::Markup;
use crate::types::Viewport;

/// Text shown in the section above the phrases.
pub const INTRO_TEXT: &str = "scroll down";

/// Text shown in the section below the phrases.
pub const OUTRO_TEXT: &str = "The End.";

/// Document-space position of one line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinePlacement {
    pub x: i32,
    pub y: i32,
    pub width: u16,
}

/// Computed geometry for the whole page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageLayout {
    pub viewport: Viewport,
    /// Total document height in rows.
    pub page_height: u16,
    /// The phrase section, used as the scroll trigger element.
    pub trigger: TriggerRect,
    /// One placement per phrase line, in markup order.
    pub lines: Vec<LinePlacement>,
    pub intro: LinePlacement,
    pub outro: LinePlacement,
}

impl PageLayout {
    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self) -> u16 {
        self.page_height.saturating_sub(self.viewport.height)
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn cells(n: u16) -> Dimension {
    Dimension::Length(n as f32)
}

/// Fixed one-row leaf for a line of text.
fn line_style(width: u16) -> Style {
    Style {
        size: Size {
            width: cells(width),
            height: cells(1),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

/// Full-viewport section centering its children in a column.
fn section_style(viewport: Viewport, gap: u16) -> Style {
    Style {
        flex_direction: FlexDirection::Column,
        justify_content: Some(JustifyContent::Center),
        align_items: Some(AlignItems::Center),
        gap: Size {
            width: LengthPercentage::Length(0.0),
            height: LengthPercentage::Length(gap as f32),
        },
        size: Size {
            width: cells(viewport.width),
            height: cells(viewport.height),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Lay out the intro, phrase and outro sections for `viewport`.
pub fn compute_page_layout(
    markup: &Markup,
    viewport: Viewport,
    line_gap: u16,
) -> Result<PageLayout, LayoutError> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let intro_leaf = tree.new_leaf(line_style(INTRO_TEXT.width() as u16))?;
    let intro = tree.new_with_children(section_style(viewport, 0), &[intro_leaf])?;

    let line_leaves: Vec<NodeId> = markup
        .lines
        .iter()
        .map(|line| tree.new_leaf(line_style(line.width())))
        .collect::<Result<_, _>>()?;
    let phrases = tree.new_with_children(section_style(viewport, line_gap), &line_leaves)?;

    let outro_leaf = tree.new_leaf(line_style(OUTRO_TEXT.width() as u16))?;
    let outro = tree.new_with_children(section_style(viewport, 0), &[outro_leaf])?;

    let root = tree.new_with_children(
        Style {
            flex_direction: FlexDirection::Column,
            size: Size {
                width: cells(viewport.width),
                height: Dimension::Auto,
            },
            ..Default::default()
        },
        &[intro, phrases, outro],
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(viewport.width as f32),
            height: AvailableSpace::MaxContent,
        },
    )?;

    let place = |tree: &TaffyTree<()>, section: NodeId, leaf: NodeId| -> Result<LinePlacement, LayoutError> {
        let outer = tree.layout(section)?;
        let inner = tree.layout(leaf)?;
        Ok(LinePlacement {
            x: (outer.location.x + inner.location.x).round() as i32,
            y: (outer.location.y + inner.location.y).round() as i32,
            width: inner.size.width.round() as u16,
        })
    };

    let lines = line_leaves
        .iter()
        .map(|&leaf| place(&tree, phrases, leaf))
        .collect::<Result<Vec<_>, _>>()?;

    let section = tree.layout(phrases)?;
    let trigger = TriggerRect::new(section.location.y, section.size.height);
    let page_height = tree.layout(root)?.size.height.round() as u16;

    Ok(PageLayout {
        viewport,
        page_height,
        trigger,
        lines,
        intro: place(&tree, intro, intro_leaf)?,
        outro: place(&tree, outro, outro_leaf)?,
    })
}
