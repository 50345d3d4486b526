/*!

This is the long-form manual for `survey_scoring` and `surveyscore`.

## Response sheet

The responses are read from a sheet (by default `Form Responses 1`, as created
by Google Forms). The first row holds the column titles and is skipped. Each
following row is one participant:

| column | content |
|--------|---------|
| A      | timestamp: reading stops at the first row where it is empty or holds only whitespace |
| B      | company |
| C...   | the answers of each questionnaire, one column per question, in question order |

When several questionnaires are filled in the same form, their answer columns
follow each other. Positions can also be set explicitly in the run
configuration.

Answers are compared after trimming, lower-casing and collapsing whitespace,
so `Скорее  да, чем НЕТ` is read as `Скорее да, чем нет`. An answer that does
not match any option stops the run: no score is ever guessed.

## Built-in questionnaires

- `team`: 44 questions, 11 scales.
- `personnel`: 112 questions, 28 scales.

Both use the five agreement labels from `Нет, это совсем не так` (1) to
`Да, совершенно верно` (5), some questions being reversed (5 to 1).

## Catalog files

More questionnaires can be described in JSON files passed with `--catalog` or
listed in `catalogFiles`:

```json
{
  "questionnaires": [
    {
      "id": "temperament",
      "name": "Temperament",
      "index": 1,
      "scoring": "forcedChoice",
      "optionLabels": ["A", "B", "C"],
      "keys": [[2, 1, 0], [0, 1, 2], [0, 2, 1]],
      "scales": [{ "name": "Warmth", "questions": [1, 3] }, { "name": "Reasoning", "questions": [2] }]
    }
  ]
}
```

- `scoring` is either `likert` or `forcedChoice`.
- `likert` questionnaires list their labels from the weakest to the strongest
  agreement in `optionLabels` and the reversed questions in `reversed`. The
  number of questions is the length of `titles`, or `questionCount`.
- `forcedChoice` questionnaires give one key per question in `keys`: the
  answer `optionLabels[i]` scores `key[i]`.
- `index` is the position of the questionnaire's block on the company sheets.

## Company sheets

Every company found in the responses gets a sheet named after it. The sheet
is cleared, then each questionnaire writes a block starting at row
`1 + index × (participants + 3)`:

Two questionnaires of one run may not share a block position: such a layout
is rejected before anything is written.

```text
| Опросник     | Руководитель.Видение | ...
| Acme 1       | 17                   | ...
| Acme 2       | 12                   | ...
| Acme AVG     | 14.5                 | ...
```
*/
