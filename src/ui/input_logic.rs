/// Move selection cursor one item up, wrapping to the last item.
pub fn select_prev(selected: usize, item_count: usize) -> usize {
    if item_count == 0 {
        0
    } else if selected == 0 || selected >= item_count {
        item_count - 1
    } else {
        selected - 1
    }
}

/// Move selection cursor one item down, wrapping to the first item.
pub fn select_next(selected: usize, item_count: usize) -> usize {
    if item_count == 0 || selected + 1 >= item_count {
        0
    } else {
        selected + 1
    }
}
