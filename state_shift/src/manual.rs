/*!

This is the long-form manual for `state_shift` and `shiftcount`.

## Input format

Each election year is a CSV file with a header row and one row per county.
The following columns are required, in any order:

```text
state_name,county_name,votes_dem,votes_gop,total_votes
Ohio,Adams,3000,9000,12200
Ohio,Allen,15000,31000,46800
```

Other columns (`county_name` above) are ignored. A vote count that cannot be
read as a number is counted as zero and a warning is logged.

## Output

For each state, the votes of all its counties are summed, then compared
between the two years:

* `dem_shift`, `gop_shift`, `total_shift`: later minus earlier raw votes
* `dem_pct_2020`, `gop_pct_2020`, `dem_pct_2024`, `gop_pct_2024`: the share of each party in its year, in percent
* `margin_shift`: `dem_pct_2024 - dem_pct_2020`, in percentage points. A positive value is a Democratic shift.

The `2020` fields always describe the first file (year A) and the `2024`
fields the second one (year B), whatever the actual years.

A state with no votes in one of the two years cannot be compared. It is
still listed with all the states (and can be selected) but it has no result.

## Configuration

```json
{
  "outputSettings": { "title": "Presidential 2020 vs 2024", "outputPath": "summary.json" },
  "sources": {
    "yearA": { "label": "2020", "filePath": "counties_2020.csv" },
    "yearB": { "label": "2024", "filePath": "counties_2024.csv" }
  },
  "display": { "sortMode": "margin", "displayCount": "10" }
}
```

File paths are relative to the configuration file.

### `sortMode`

* `alphabetical` (default): the states in alphabetical order
* `margin`: largest absolute margin shift first
* `dem`: largest absolute Democratic vote shift first
* `gop`: largest absolute Republican vote shift first

When sorting by a shift, the states without a result are left out. Ties
keep the alphabetical order.

### `displayCount`

One of `5`, `10`, `20`, `30` or `all` (default).

*/
